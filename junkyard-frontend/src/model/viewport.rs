#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ViewPort {
    pub height: usize,
    pub offset: usize,
}

impl ViewPort {
    /// Shifts the offset the least amount needed to keep `index` visible.
    pub fn follow(&mut self, index: usize) {
        if index < self.offset {
            self.offset = index;
        } else if self.height == 0 {
            self.offset = index;
        } else if index >= self.offset + self.height {
            self.offset = index + 1 - self.height;
        }
    }

    pub fn max_offset(&self, total: usize) -> usize {
        total.saturating_sub(self.height)
    }

    pub fn scroll_down(&mut self, count: usize, total: usize) {
        self.offset = (self.offset + count).min(self.max_offset(total));
    }

    pub fn scroll_up(&mut self, count: usize) {
        self.offset = self.offset.saturating_sub(count);
    }

    pub fn half_page(&self) -> usize {
        (self.height / 2).max(1)
    }
}
