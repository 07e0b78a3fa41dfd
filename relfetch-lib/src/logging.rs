use tracing_indicatif::style::ProgressStyle;

use anyhow::Result;
use tracing::field::{Field, Visit};
use tracing::span::Record;
use tracing::{Event, Subscriber};
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::field::RecordFields;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields, FormattedFields};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;

const TICKS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"];

/// Fixed 50 cell bar, used when the total size is known.
pub fn progress_bar_style() -> Result<ProgressStyle> {
    let style = ProgressStyle::with_template(
        "{msg} [{bar:50.cyan/blue}] {percent:>3}% {bytes}/{total_bytes} ({bytes_per_sec}, {eta})",
    )?;
    Ok(style.progress_chars("#>-"))
}

pub fn spinner_style(template: &str) -> Result<ProgressStyle> {
    let style = ProgressStyle::with_template(&format!(
        "{{spinner:.green}} [{{elapsed_precise}}] {}",
        template
    ))?;
    Ok(style.tick_strings(TICKS))
}

/// Filter directives for the given verbosity. Dependencies stay at INFO so
/// `--verbose` shows our debug output without hyper's connection chatter.
pub fn log_directives(verbose: bool) -> &'static str {
    if verbose {
        "info,relfetch=debug,relfetch_lib=debug"
    } else {
        "info"
    }
}

/// Installs the global subscriber: plain messages on stdout plus progress bars
/// for instrumented spans.
pub fn initialize_logging(verbose: bool) -> Result<()> {
    let filter = EnvFilter::try_new(log_directives(verbose))?;
    let progress_bar_layer = IndicatifLayer::new();
    let fmt_layer = fmt::layer()
        .with_writer(progress_bar_layer.get_stdout_writer())
        .event_format(NoSpanFormat)
        .fmt_fields(OnlyMessageField);
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(progress_bar_layer)
        .try_init()?;
    Ok(())
}

/// Writes the `message` field of an event and nothing else.
pub struct OnlyMessageField;

impl<'writer> FormatFields<'writer> for OnlyMessageField {
    fn format_fields<R: RecordFields>(
        &self,
        mut writer: Writer<'writer>,
        fields: R,
    ) -> std::fmt::Result {
        struct Visitor<'a> {
            writer: &'a mut dyn std::fmt::Write,
        }

        impl Visit for Visitor<'_> {
            fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
                if field.name() == "message" {
                    let _ = write!(self.writer, "{value:?}");
                }
            }
        }

        fields.record(&mut Visitor {
            writer: &mut writer,
        });
        Ok(())
    }

    fn add_fields(
        &self,
        _current: &'writer mut FormattedFields<Self>,
        _fields: &Record<'_>,
    ) -> std::fmt::Result {
        Ok(())
    }
}

/// One line per event, without timestamps, levels or span context.
#[derive(Clone, Debug, Default)]
pub struct NoSpanFormat;

impl<S, N> FormatEvent<S, N> for NoSpanFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}
