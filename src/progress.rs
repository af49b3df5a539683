//! Progress display while provisioning specifications

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// One bar over the specifications being scanned
pub struct ProgressDisplay {
    specs_pb: ProgressBar,
}

impl ProgressDisplay {
    /// Bar for `total_specs` specifications; hidden when `visible` is false
    pub fn new(total_specs: u64, visible: bool) -> Self {
        let style = ProgressStyle::default_bar()
            .template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");

        let specs_pb = ProgressBar::new(total_specs);
        specs_pb.set_style(style);
        if !visible {
            specs_pb.set_draw_target(ProgressDrawTarget::hidden());
        }

        Self { specs_pb }
    }

    /// Show the specification being scanned
    pub fn update_spec(&self, spec: &str) {
        // Keep the line short for long file URLs
        let display = if spec.chars().count() > 60 {
            let tail: String = spec.chars().rev().take(57).collect::<Vec<_>>().into_iter().rev().collect();
            format!("...{tail}")
        } else {
            spec.to_string()
        };
        self.specs_pb.set_message(display);
    }

    pub fn inc_spec(&self) {
        self.specs_pb.inc(1);
    }

    pub fn finish(&self) {
        self.specs_pb.finish_and_clear();
    }

    /// Abandon on error
    pub fn abandon(&self) {
        self.specs_pb.abandon();
    }
}
