use console::Term;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use super::styling::{bright_green, bright_red, bright_yellow};

/// Spinner shown on stderr while variables are fetched.
///
/// Hidden when stderr is not a terminal, so `eval $(glen)` and CI logs stay clean.
pub struct CollectProgress {
    pb: ProgressBar,
}

impl CollectProgress {
    pub fn start(project_path: &str, scope_count: usize) -> Self {
        let pb = if Term::stderr().is_term() {
            create_spinner(
                bright_yellow(format!(
                    "Collecting variables for {project_path} ({scope_count} scopes)"
                ))
                .to_string(),
            )
        } else {
            ProgressBar::hidden()
        };
        Self { pb }
    }

    pub fn finish(self, variable_count: usize) {
        self.pb.finish_with_message(
            bright_green(format!("Collected {variable_count} variables ✓")).to_string(),
        );
    }

    pub fn fail(self) {
        self.pb
            .abandon_with_message(bright_red("Failed to collect variables ✗").to_string());
    }
}

fn create_spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_draw_target(ProgressDrawTarget::stderr());
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("  {msg} {spinner}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message);
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}
