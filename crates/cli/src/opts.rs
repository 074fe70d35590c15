//! The option record and its flag table

use rig_core::BuildConfig;

use crate::flags::FlagSpec;

/// Everything the command line can set. Built with defaults, populated
/// by the parser, read-only afterward.
#[derive(Debug, Default)]
pub struct Options {
    pub help: bool,
    pub version: bool,
    pub verbose: bool,
    pub config: BuildConfig,
    /// Directory root discovery starts from; empty means the current
    /// working directory
    pub root: String,
}

impl Options {
    /// The full flag table. Parsing and help rendering both consume the
    /// descriptors this returns, in this order.
    pub fn descriptors() -> Vec<FlagSpec<Options>> {
        vec![
            FlagSpec::verb("-h", "--help", "Display this help message and exit.", |o| {
                o.help = true;
            }),
            FlagSpec::verb("", "--version", "Print the version number and exit.", |o| {
                o.version = true;
            }),
            FlagSpec::verb("-v", "--verbose", "Enable verbose logging output.", |o| {
                o.verbose = true;
            }),
            FlagSpec::choice(
                "-c",
                "--config",
                "Selects the build configuration used to compile \
                 every project in the solution. Defaults to Debug \
                 when not given.",
                |o, value| match BuildConfig::parse(value) {
                    Some(config) => {
                        o.config = config;
                        true
                    }
                    None => false,
                },
                BuildConfig::variants(),
            ),
            FlagSpec::text(
                "-r",
                "--root",
                "Directory to start root discovery from instead of \
                 the current working directory.",
                |o, value| {
                    o.root = value.to_string();
                },
            ),
        ]
    }
}
