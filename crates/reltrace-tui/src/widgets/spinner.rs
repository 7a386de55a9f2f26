const FRAMES: &[&str] = &[
    "\u{280b}", "\u{2819}", "\u{2839}", "\u{2838}", "\u{283c}", "\u{2834}", "\u{2826}",
    "\u{2827}", "\u{2807}", "\u{280f}",
];

const STILL_FRAME: &str = "\u{2022}";

#[derive(Debug, Clone)]
pub struct Spinner {
    tick: usize,
    animated: bool,
}

impl Spinner {
    pub fn new(animated: bool) -> Self {
        Self { tick: 0, animated }
    }

    pub fn tick(&mut self) {
        if self.animated {
            self.tick = (self.tick + 1) % FRAMES.len();
        }
    }

    pub fn frame(&self) -> &str {
        if self.animated {
            FRAMES[self.tick]
        } else {
            STILL_FRAME
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycles_through_frames() {
        let mut spinner = Spinner::new(true);
        let first = spinner.frame().to_string();
        for _ in 0..FRAMES.len() {
            spinner.tick();
        }
        assert_eq!(spinner.frame(), first);
    }

    #[test]
    fn still_when_animation_disabled() {
        let mut spinner = Spinner::new(false);
        spinner.tick();
        assert_eq!(spinner.frame(), STILL_FRAME);
    }
}
