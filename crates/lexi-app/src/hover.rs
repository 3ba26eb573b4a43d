/// Hover bookkeeping for the tooltip.
///
/// Every transition bumps a generation; a delayed show or hide only runs when
/// nothing happened since it was scheduled.
#[derive(Debug, Default)]
pub struct HoverState {
    generation: u64,
    word: Option<String>,
    over_tooltip: bool,
}

impl HoverState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer entered a highlighted word
    pub fn enter_word(&mut self, word: &str) -> u64 {
        self.word = Some(word.to_string());
        self.bump()
    }

    pub fn leave_word(&mut self) -> u64 {
        self.word = None;
        self.bump()
    }

    pub fn enter_tooltip(&mut self) -> u64 {
        self.over_tooltip = true;
        self.bump()
    }

    pub fn leave_tooltip(&mut self) -> u64 {
        self.over_tooltip = false;
        self.bump()
    }

    /// Tooltip is gone, forget everything
    pub fn reset(&mut self) {
        self.word = None;
        self.over_tooltip = false;
        self.bump();
    }

    pub fn word(&self) -> Option<&str> {
        self.word.as_deref()
    }

    pub fn should_show(&self, generation: u64, word: &str) -> bool {
        self.generation == generation && self.word.as_deref() == Some(word)
    }

    pub fn should_hide(&self, generation: u64) -> bool {
        self.generation == generation && self.word.is_none() && !self.over_tooltip
    }

    fn bump(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }
}
