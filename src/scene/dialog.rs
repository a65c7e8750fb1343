use crate::engine::{Point, Rect, Renderer, Size, TextAlign};

const SCRIPT: [&str; 8] = [
    "287 Evergreen Ave, Bushwick NY\n\n\nJuly 1st 2024",
    "It's tough looking at the things you saw potential in and kept",
    "knowing you won't, or shouldn't bring with you on your new chapter.",
    "Moving isn't all bad though.",
    "Like when it poured on Wriston and we moved a 100$ futon and endless boxes",
    "or when we moved out of 102 Governor in Munetta,",
    "or when we moved to sobu and had our first Dicayagua trip.",
    "Anyway -- time to get these boxes to the bay so I can move on in life.",
];

const LETTER_DELAY_MS: f64 = 1.0;
const BOX_WIDTH: f64 = 500.0;
const BOX_HEIGHT: f64 = 100.0;
const PADDING: f64 = 20.0;
const LINE_HEIGHT: f64 = 24.0;
const FONT_SIZE: f64 = 15.0;

/// Typewriter text box, one letter per tick. Space moves to the next line
/// once the current one is fully typed, holding it down only counts once
pub struct Dialog {
    script: &'static [&'static str],
    line: usize,
    typed: usize,
    last_letter: f64,
    space_was_down: bool,
}

impl Default for Dialog {
    fn default() -> Self {
        Dialog::new(&SCRIPT)
    }
}

impl Dialog {
    pub fn new(script: &'static [&'static str]) -> Self {
        Dialog {
            script,
            line: 0,
            typed: 0,
            last_letter: f64::NEG_INFINITY,
            space_was_down: false,
        }
    }

    fn target(&self) -> &'static str {
        self.script.get(self.line).copied().unwrap_or("")
    }

    pub fn current_text(&self) -> &'static str {
        let target = self.target();
        let end = target
            .char_indices()
            .nth(self.typed)
            .map_or(target.len(), |(index, _)| index);
        &target[..end]
    }

    pub fn is_waiting_for_next(&self) -> bool {
        self.typed >= self.target().chars().count()
    }

    pub fn has_next(&self) -> bool {
        self.line + 1 < self.script.len()
    }

    pub fn update(&mut self, now: f64) {
        if !self.is_waiting_for_next() && now - self.last_letter > LETTER_DELAY_MS {
            self.typed += 1;
            self.last_letter = now;
        }
    }

    pub fn handle_input(&mut self, space_down: bool) {
        if space_down && !self.space_was_down && self.is_waiting_for_next() && self.has_next() {
            self.line += 1;
            self.typed = 0;
        }
        self.space_was_down = space_down;
    }

    pub fn draw(&self, renderer: &Renderer, canvas: Size) {
        let frame = Rect::new(
            canvas.width / 2.0 - BOX_WIDTH / 2.0,
            canvas.height - BOX_HEIGHT * 1.5,
            BOX_WIDTH,
            BOX_HEIGHT,
        );
        renderer.fill(&frame, "rgba(255, 255, 255, 0.6)");
        renderer.outline(&frame, "black", 3.0);

        let max_width = BOX_WIDTH - PADDING * 2.0;
        let lines = wrap(self.current_text(), max_width, |text| {
            renderer.measure_text(text, FONT_SIZE)
        });
        let padding_y = PADDING / 1.25;
        let mut y = frame.y + padding_y * 2.0;
        for line in lines {
            renderer.draw_text(&line, Point::new(frame.x + PADDING, y), FONT_SIZE, "black", TextAlign::Left);
            y += LINE_HEIGHT;
        }

        if self.is_waiting_for_next() && self.has_next() {
            renderer.draw_text(
                "→ space",
                Point::new(frame.right() - PADDING * 5.0, frame.bottom() - padding_y),
                12.0,
                "black",
                TextAlign::Left,
            );
        }
    }
}

/// Greedy word wrap, explicit newlines always break
pub fn wrap(text: &str, max_width: f64, measure: impl Fn(&str) -> f64) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split(' ').filter(|word| !word.is_empty()) {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };
            if measure(&candidate) > max_width && !current.is_empty() {
                lines.push(std::mem::replace(&mut current, word.to_string()));
            } else {
                current = candidate;
            }
        }
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHORT: [&str; 2] = ["hi", "yo"];

    fn typed_out(dialog: &mut Dialog, start: f64) -> f64 {
        let mut now = start;
        while !dialog.is_waiting_for_next() {
            now += 2.0;
            dialog.update(now);
        }
        now
    }

    #[test]
    fn types_one_letter_per_tick() {
        let mut dialog = Dialog::new(&SHORT);
        assert_eq!(dialog.current_text(), "");
        dialog.update(10.0);
        assert_eq!(dialog.current_text(), "h");
        // too soon for the next letter
        dialog.update(10.5);
        assert_eq!(dialog.current_text(), "h");
        dialog.update(12.0);
        assert_eq!(dialog.current_text(), "hi");
        assert!(dialog.is_waiting_for_next());
    }

    #[test]
    fn space_only_advances_finished_lines_once() {
        let mut dialog = Dialog::new(&SHORT);
        dialog.handle_input(true);
        assert_eq!(dialog.line, 0);
        dialog.handle_input(false);

        typed_out(&mut dialog, 0.0);
        dialog.handle_input(true);
        assert_eq!(dialog.line, 1);
        assert_eq!(dialog.current_text(), "");

        typed_out(&mut dialog, 100.0);
        // still held from before
        dialog.handle_input(true);
        assert_eq!(dialog.line, 1);
        dialog.handle_input(false);
        dialog.handle_input(true);
        // last line, nowhere to go
        assert_eq!(dialog.line, 1);
        assert!(!dialog.has_next());
    }

    #[test]
    fn multibyte_text_is_typed_per_char() {
        static ARROWS: [&str; 1] = ["→→"];
        let mut dialog = Dialog::new(&ARROWS);
        dialog.update(5.0);
        assert_eq!(dialog.current_text(), "→");
    }

    #[test]
    fn wraps_on_width_and_newlines() {
        let measure = |text: &str| text.chars().count() as f64;
        assert_eq!(
            wrap("aa bb cc\ndd", 5.0, measure),
            vec!["aa bb".to_string(), "cc".to_string(), "dd".to_string()]
        );
        assert_eq!(wrap("unbreakable", 3.0, measure), vec!["unbreakable".to_string()]);
    }
}
