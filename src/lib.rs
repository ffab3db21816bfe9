//! CareHub library exports for testing

use clap::ValueEnum;

pub mod core;
pub mod tui;

#[cfg(test)]
pub mod test_support;

/// Which conversation tab to open on start-up.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum StartAudience {
    #[default]
    Parent,
    Support,
}

impl From<StartAudience> for crate::core::model::Audience {
    fn from(value: StartAudience) -> Self {
        match value {
            StartAudience::Parent => crate::core::model::Audience::Parent,
            StartAudience::Support => crate::core::model::Audience::Support,
        }
    }
}
