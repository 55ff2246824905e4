// Bridge from the `log` facade

use crate::output::log as write_line;
use crate::{Level, current_level, is_level_enabled};

/// Routes `log::info!` and friends from other crates through formrule output.
pub struct FacadeLogger;

static LOGGER: FacadeLogger = FacadeLogger;

impl log::Log for FacadeLogger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        is_level_enabled(Level::from(metadata.level()))
    }

    fn log(&self, record: &log::Record<'_>) {
        if self.enabled(record.metadata()) {
            write_line(
                Level::from(record.level()),
                record.target(),
                &record.args().to_string(),
            );
        }
    }

    fn flush(&self) {}
}

/// Install the bridge as the global `log` logger.
///
/// Fails if another logger is already installed.
pub fn install_facade() -> Result<(), log::SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(current_level().to_level_filter());
    Ok(())
}
