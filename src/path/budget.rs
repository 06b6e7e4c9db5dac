/// Frame allocation for element-by-element drawing.
///
/// Travel segments get a fixed share; each element's drawing share is recomputed from what is
/// left so rounding never accumulates and the last element consumes the remaining budget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameBudget {
    total: usize,
    elements: usize,
    travel_per: usize,
    draw_per: usize,
}

impl FrameBudget {
    /// Minimum travel samples between two elements.
    pub const MIN_TRAVEL: usize = 5;
    /// Minimum drawing samples per element.
    pub const MIN_DRAW: usize = 10;

    pub fn new(total: usize, elements: usize) -> Self {
        let n = elements.max(1);
        let travel_per = (total / (n * 10)).max(Self::MIN_TRAVEL);
        let draw_per = (total.saturating_sub(travel_per * n) / n).max(Self::MIN_DRAW);
        Self {
            total,
            elements: n,
            travel_per,
            draw_per,
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Samples for each inter-element move.
    pub fn travel_frames(&self) -> usize {
        self.travel_per
    }

    /// Nominal drawing share per element.
    pub fn draw_frames_per(&self) -> usize {
        self.draw_per
    }

    /// Drawing samples for element `index` when `used` frames have already been emitted.
    pub fn allot(&self, index: usize, used: usize) -> usize {
        let remaining = self.total.saturating_sub(used);
        let remaining_elements = self.elements.saturating_sub(index).max(1);
        if remaining_elements == 1 {
            return remaining.max(1);
        }
        let remaining_travels = remaining_elements - 1;
        let share =
            remaining.saturating_sub(self.travel_per * remaining_travels) / remaining_elements;
        self.draw_per.min(share.max(Self::MIN_DRAW))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/path/budget.rs"]
mod tests;
