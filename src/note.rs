use std::fmt;
use std::str::FromStr;

/// A MIDI key number (0..=127), parsed from scientific pitch notation.
///
/// `C4` is 60. Accepts `#`/`♯` for sharps and `b`/`♭` for flats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Note(u8);

const NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

impl Note {
    pub fn new(key: u8) -> Option<Self> {
        (key <= 127).then_some(Note(key))
    }

    pub fn key(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let octave = i32::from(self.0 / 12) - 1;
        write!(f, "{}{}", NAMES[usize::from(self.0 % 12)], octave)
    }
}

impl FromStr for Note {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let text = input.trim();
        let mut chars = text.chars();
        let letter = chars.next().ok_or_else(|| "empty note".to_string())?;

        let mut class: i32 = match letter.to_ascii_uppercase() {
            'C' => 0,
            'D' => 2,
            'E' => 4,
            'F' => 5,
            'G' => 7,
            'A' => 9,
            'B' => 11,
            _ => return Err(format!("bad note letter: {letter}")),
        };

        let mut tail = chars.as_str();
        if let Some(rest) = tail.strip_prefix(['#', '♯']) {
            class += 1;
            tail = rest;
        } else if let Some(rest) = tail.strip_prefix(['b', 'B', '♭']) {
            class -= 1;
            tail = rest;
        }

        let tail = tail.trim();
        if tail.is_empty() {
            return Err(format!("missing octave in {text:?}, expected like C#4"));
        }
        let octave: i32 = tail.parse().map_err(|_| format!("bad octave: {tail}"))?;

        let key = (octave + 1) * 12 + class;
        u8::try_from(key)
            .ok()
            .and_then(Note::new)
            .ok_or_else(|| format!("note out of MIDI range 0..127: {key}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_naturals_and_accidentals() {
        assert_eq!("C4".parse::<Note>().unwrap().key(), 60);
        assert_eq!("a3".parse::<Note>().unwrap().key(), 57);
        assert_eq!("F#5".parse::<Note>().unwrap().key(), 78);
        assert_eq!("Bb3".parse::<Note>().unwrap().key(), 58);
        assert_eq!("C-1".parse::<Note>().unwrap().key(), 0);
        assert_eq!(" G4 ".parse::<Note>().unwrap().key(), 67);
    }

    #[test]
    fn rejects_garbage() {
        assert!("".parse::<Note>().is_err());
        assert!("H4".parse::<Note>().is_err());
        assert!("C".parse::<Note>().is_err());
        assert!("Cb-1".parse::<Note>().is_err());
        assert!("G9".parse::<Note>().is_ok());
        assert!("G#9".parse::<Note>().is_err());
    }

    #[test]
    fn displays_sharp_names() {
        assert_eq!(Note::new(61).unwrap().to_string(), "C#4");
        assert_eq!(Note::new(57).unwrap().to_string(), "A3");
        assert!(Note::new(128).is_none());
    }
}
