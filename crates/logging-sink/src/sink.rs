mod guard;
mod line_sink;

pub use guard::LineModeGuard;
pub use line_sink::LineSink;
