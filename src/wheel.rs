/// Which ring cells are win cells. The length is fixed when the wheel is made.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Wheel {
    cells: Box<[bool]>,
}

/// one step clockwise, i.e. down an index, wrapping at zero
pub fn step_back(index: usize, len: usize) -> usize {
    if index == 0 {
        len - 1
    } else {
        index - 1
    }
}

impl Wheel {
    /// a wheel of `len` lose cells
    pub fn new(len: usize) -> Self {
        Wheel {
            cells: vec![false; len].into_boxed_slice(),
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn is_win(&self, index: usize) -> bool {
        self.cells[index]
    }

    pub fn win_count(&self) -> usize {
        self.cells.iter().filter(|&&w| w).count()
    }

    /// Mark `win_count` cells as wins starting at `start` and walking
    /// clockwise (down the indices, the way the cursor travels), then mark
    /// the rest as losses carrying on the same way.
    ///
    /// `start` must be on the wheel and `win_count` can't be more than the
    /// wheel holds.
    pub fn place_win_cells(&mut self, start: usize, win_count: usize) {
        let len = self.len();
        debug_assert!(start < len, "start {} is off a wheel of {}", start, len);
        debug_assert!(
            win_count <= len,
            "{} win cells don't fit on a wheel of {}",
            win_count,
            len
        );
        let mut index = start;
        for n in 0..len {
            self.cells[index] = n < win_count;
            index = step_back(index, len);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wins(w: &Wheel) -> Vec<usize> {
        (0..w.len()).filter(|&i| w.is_win(i)).collect()
    }

    #[test]
    fn test_new_wheel_all_lose() {
        let w = Wheel::new(10);
        assert_eq!(w.len(), 10);
        assert_eq!(w.win_count(), 0);
    }

    #[test]
    fn test_step_back_wraps() {
        assert_eq!(step_back(5, 10), 4);
        assert_eq!(step_back(0, 10), 9);
        assert_eq!(step_back(0, 1), 0);
    }

    #[test]
    fn test_place_from_top_of_ring() {
        let mut w = Wheel::new(10);
        w.place_win_cells(9, 6);
        assert_eq!(wins(&w), [4, 5, 6, 7, 8, 9]);
        for i in 0..4 {
            assert!(!w.is_win(i));
        }
    }

    #[test]
    fn test_place_wraps_below_zero() {
        let mut w = Wheel::new(10);
        w.place_win_cells(2, 5);
        assert_eq!(wins(&w), [0, 1, 2, 8, 9]);
    }

    #[test]
    fn test_replace_clears_old_wins() {
        let mut w = Wheel::new(10);
        w.place_win_cells(9, 6);
        w.place_win_cells(3, 2);
        assert_eq!(wins(&w), [2, 3]);
    }

    #[test]
    fn test_place_none_and_all() {
        let mut w = Wheel::new(10);
        w.place_win_cells(4, 10);
        assert_eq!(w.win_count(), 10);
        w.place_win_cells(4, 0);
        assert_eq!(w.win_count(), 0);
    }

    #[test]
    fn test_every_placement_is_a_clockwise_run() {
        for len in 1..=12 {
            for start in 0..len {
                for count in 0..=len {
                    let mut w = Wheel::new(len);
                    w.place_win_cells(start, count);
                    assert_eq!(w.win_count(), count);
                    let mut index = start;
                    for n in 0..len {
                        assert_eq!(w.is_win(index), n < count, "{} {} {}", len, start, count);
                        index = step_back(index, len);
                    }
                }
            }
        }
    }

    #[test]
    #[should_panic]
    #[cfg(debug_assertions)]
    fn test_place_rejects_too_many_wins() {
        let mut w = Wheel::new(10);
        w.place_win_cells(0, 11);
    }

    #[test]
    #[should_panic]
    fn test_place_rejects_start_off_wheel() {
        let mut w = Wheel::new(10);
        w.place_win_cells(10, 3);
    }
}
