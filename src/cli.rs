use clap::Parser;

use crate::config::AppConfig;
use crate::overlay::{AnchorSide, ModalSize};

#[derive(Parser, Debug, Default)]
#[command(name = "veil", version, about = "Animated modal and popup overlays for the terminal")]
pub struct Args {
    /// Side of the trigger the popup attaches to (top, right, bottom, left)
    #[arg(long, value_parser = parse_side)]
    pub side: Option<AnchorSide>,

    /// Modal width (small, medium, large, full)
    #[arg(long, value_parser = parse_size)]
    pub size: Option<ModalSize>,

    /// Center the modal vertically instead of pinning it near the top
    #[arg(long)]
    pub centered: Option<bool>,

    /// Length of enter and exit animations in milliseconds
    #[arg(long)]
    pub duration_ms: Option<u64>,

    /// Show and hide overlays without animating
    #[arg(long)]
    pub reduced_motion: bool,

    /// Write the effective configuration, overrides included, to the config file
    #[arg(long)]
    pub save_config: bool,
}

impl Args {
    /// Layer command line overrides on top of the loaded config.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(side) = self.side {
            config.popup.side = Some(side.name().to_string());
        }
        if let Some(size) = self.size {
            config.modal.size = size;
        }
        if let Some(centered) = self.centered {
            config.modal.centered = centered;
        }
        if let Some(duration_ms) = self.duration_ms {
            config.animation.duration_ms = duration_ms;
        }
        if self.reduced_motion {
            config.animation.reduced_motion = true;
        }
    }
}

fn parse_side(value: &str) -> Result<AnchorSide, String> {
    AnchorSide::ALL
        .into_iter()
        .find(|side| side.name().eq_ignore_ascii_case(value.trim()))
        .ok_or_else(|| format!("Unknown side: {value}"))
}

fn parse_size(value: &str) -> Result<ModalSize, String> {
    ModalSize::ALL
        .into_iter()
        .find(|size| size.name().eq_ignore_ascii_case(value))
        .ok_or_else(|| format!("Unknown size: {value}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_replace_config_values() {
        let args = Args::parse_from([
            "veil",
            "--side",
            "Right",
            "--size",
            "full",
            "--centered",
            "false",
            "--duration-ms",
            "80",
            "--reduced-motion",
        ]);
        let mut config = AppConfig::default();
        args.apply(&mut config);

        assert_eq!(config.popup.anchor_side(), Some(AnchorSide::Right));
        assert_eq!(config.modal.size, ModalSize::Full);
        assert!(!config.modal.centered);
        assert_eq!(config.animation.duration_ms, 80);
        assert!(config.animation.reduced_motion);
    }

    #[test]
    fn test_no_flags_keep_config() {
        let mut config = AppConfig::default();
        Args::parse_from(["veil"]).apply(&mut config);
        assert_eq!(config.modal.centered, AppConfig::default().modal.centered);
        assert_eq!(config.popup, AppConfig::default().popup);
    }

    #[test]
    fn test_save_config_flag() {
        assert!(Args::parse_from(["veil", "--save-config"]).save_config);
        assert!(!Args::parse_from(["veil"]).save_config);
    }

    #[test]
    fn test_rejects_unknown_side() {
        assert!(Args::try_parse_from(["veil", "--side", "diagonal"]).is_err());
    }
}
