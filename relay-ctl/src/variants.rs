use clap::ValueEnum;
use cmd_relay::{ExecVariant, RelayConfig};

/// Command-line face of [`ExecVariant`]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum VariantArg {
    /// Input file only
    Plain,
    /// `-C INFORMIX` before the input file
    Informix,
}

impl VariantArg {
    pub fn variant(&self) -> ExecVariant {
        match self {
            VariantArg::Plain => ExecVariant::Plain,
            VariantArg::Informix => ExecVariant::Informix,
        }
    }

    pub fn description(&self) -> &'static str {
        self.variant().description()
    }

    /// The argv the variant would hand to the configured binary.
    pub fn details(&self, config: &RelayConfig) -> String {
        let args = self.variant().arguments(config, None);
        format!("{} {}", config.binary.display(), args.as_slice().join(" "))
    }

    pub fn all() -> [VariantArg; 2] {
        [VariantArg::Plain, VariantArg::Informix]
    }
}
