//! Deriving loggers without touching the original.

use rotalog::{Logger, with_debug_level, with_info_level, with_json_format, with_level_off};

fn main() {
    let base = Logger::new([with_info_level()]);
    let verbose = base.with_options([with_debug_level(), with_json_format()]);
    let silent = base.with_options([with_level_off()]);

    base.debug("hidden: base is at info", &[]);
    verbose.debug("visible: verbose is at debug", &[("level", &verbose.level())]);
    silent.error("hidden: silent is off", &[]);

    println!(
        "base={} verbose={} silent={}",
        base.level(),
        verbose.level(),
        silent.level()
    );
}
