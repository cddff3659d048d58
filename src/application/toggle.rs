use crate::domain::ports::LoanView;

pub const SHOW_INPUT_LABEL: &str = "Show Input Area";
pub const HIDE_INPUT_LABEL: &str = "Hide Input Area";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputPanel {
    #[default]
    Shown,
    Hidden,
}

/// Shows and hides the input panel independently of submissions.
#[derive(Debug, Default)]
pub struct PanelToggle {
    state: InputPanel,
}

impl PanelToggle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> InputPanel {
        self.state
    }

    /// Label the control carries for the current state.
    pub fn label(&self) -> &'static str {
        match self.state {
            InputPanel::Shown => HIDE_INPUT_LABEL,
            InputPanel::Hidden => SHOW_INPUT_LABEL,
        }
    }

    pub fn click(&mut self, view: &mut dyn LoanView) {
        self.state = match self.state {
            InputPanel::Shown => InputPanel::Hidden,
            InputPanel::Hidden => InputPanel::Shown,
        };
        self.apply(view);
    }

    /// Collapses the input panel regardless of the current state.
    pub fn close(&mut self, view: &mut dyn LoanView) {
        self.state = InputPanel::Hidden;
        self.apply(view);
    }

    fn apply(&self, view: &mut dyn LoanView) {
        view.set_input_visible(self.state == InputPanel::Shown);
        view.set_toggle_label(self.label());
    }
}
