//! Classification of control words and control symbols.

use crate::model::ColorComponent;

/// Every control word the parser acts on.
///
/// Anything else classifies as [`ControlWord::Unknown`] and is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlWord {
    /// `\rtf`
    Header,
    /// `\ansicpg N`
    CodePage(u16),
    /// `\mac`
    MacCharset,
    /// `\deff N`
    DefaultFont(u32),
    /// `\fonttbl`
    FontTable,
    /// `\f N`
    Font(u32),
    /// `\fs N`, in half points
    FontSize(u32),
    /// `\colortbl`
    ColorTable,
    /// `\red N`, `\green N`, `\blue N`
    ColorComponent(ColorComponent, u8),
    /// `\cf N`
    Foreground(usize),
    /// `\cb N` / `\highlight N`
    Background(usize),
    /// `\ul`, `\ul0`, `\ulnone`
    Underline(bool),
    /// `\b`, `\b0`
    Bold(bool),
    /// `\i`, `\i0`
    Italic(bool),
    /// `\plain`
    Plain,
    /// `\par`, `\line`
    Break,
    /// `\u N`
    Unicode(i32),
    /// `\uc N`
    UnicodeSkip(usize),
    /// A word that stands for one character, e.g. `\tab`
    Literal(char),
    /// Start of a table or metadata block whose content is not rendered
    SkipDestination,
    /// `\*`: the rest of the group may be ignored if not understood
    IgnorableDestination,
    /// Not acted on
    Unknown,
}

impl ControlWord {
    /// Classify a control word by name and parameter.
    pub fn classify(name: &str, param: Option<i32>) -> Self {
        match name {
            "rtf" => ControlWord::Header,
            "ansicpg" => unsigned(param)
                .and_then(|n| u16::try_from(n).ok())
                .map(ControlWord::CodePage)
                .unwrap_or(ControlWord::Unknown),
            "mac" => ControlWord::MacCharset,
            "deff" => unsigned(param)
                .map(ControlWord::DefaultFont)
                .unwrap_or(ControlWord::Unknown),
            "fonttbl" => ControlWord::FontTable,
            "f" => unsigned(param)
                .map(ControlWord::Font)
                .unwrap_or(ControlWord::Unknown),
            "fs" => unsigned(param)
                .map(ControlWord::FontSize)
                .unwrap_or(ControlWord::Unknown),
            "colortbl" => ControlWord::ColorTable,
            "red" => color_component(ColorComponent::Red, param),
            "green" => color_component(ColorComponent::Green, param),
            "blue" => color_component(ColorComponent::Blue, param),
            "cf" => unsigned(param)
                .map(|n| ControlWord::Foreground(n as usize))
                .unwrap_or(ControlWord::Unknown),
            "cb" | "highlight" => unsigned(param)
                .map(|n| ControlWord::Background(n as usize))
                .unwrap_or(ControlWord::Unknown),
            "ul" | "ulw" | "uld" | "uldb" => ControlWord::Underline(toggle(param)),
            "ulnone" => ControlWord::Underline(false),
            "b" => ControlWord::Bold(toggle(param)),
            "i" => ControlWord::Italic(toggle(param)),
            "plain" => ControlWord::Plain,
            "par" | "line" => ControlWord::Break,
            "u" => param.map(ControlWord::Unicode).unwrap_or(ControlWord::Unknown),
            "uc" => unsigned(param)
                .map(|n| ControlWord::UnicodeSkip(n as usize))
                .unwrap_or(ControlWord::Unknown),
            "tab" => ControlWord::Literal('\t'),
            "lquote" => ControlWord::Literal('\u{2018}'),
            "rquote" => ControlWord::Literal('\u{2019}'),
            "ldblquote" => ControlWord::Literal('\u{201C}'),
            "rdblquote" => ControlWord::Literal('\u{201D}'),
            "bullet" => ControlWord::Literal('\u{2022}'),
            "emdash" => ControlWord::Literal('\u{2014}'),
            "endash" => ControlWord::Literal('\u{2013}'),
            "stylesheet" | "info" | "pict" | "listtable" | "listoverridetable" | "revtbl"
            | "rsidtbl" | "filetbl" | "themedata" | "colorschememapping" | "latentstyles"
            | "datastore" | "xmlnstbl" | "generator" | "header" | "headerl" | "headerr"
            | "footer" | "footerl" | "footerr" => ControlWord::SkipDestination,
            _ => ControlWord::Unknown,
        }
    }

    /// Classify a control symbol (`\` followed by one non-letter).
    pub fn classify_symbol(symbol: char) -> Self {
        match symbol {
            '~' => ControlWord::Literal('\u{00A0}'),
            '_' => ControlWord::Literal('\u{2011}'),
            '*' => ControlWord::IgnorableDestination,
            // '-' (optional hyphen) and everything else is dropped
            _ => ControlWord::Unknown,
        }
    }

    /// Words that add a character to the text being collected rather than
    /// ending it.
    pub fn produces_text(&self) -> bool {
        matches!(self, ControlWord::Literal(_) | ControlWord::Unicode(_))
    }

    /// Words that open a destination when they start a group.
    pub fn is_destination(&self) -> bool {
        matches!(
            self,
            ControlWord::FontTable
                | ControlWord::ColorTable
                | ControlWord::SkipDestination
                | ControlWord::IgnorableDestination
        )
    }
}

fn unsigned(param: Option<i32>) -> Option<u32> {
    param.and_then(|n| u32::try_from(n).ok())
}

/// Absent parameter means "on"; `0` means "off".
fn toggle(param: Option<i32>) -> bool {
    param.map_or(true, |n| n != 0)
}

fn color_component(component: ColorComponent, param: Option<i32>) -> ControlWord {
    let value = param.unwrap_or(0).clamp(0, 255) as u8;
    ControlWord::ColorComponent(component, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggles() {
        assert_eq!(ControlWord::classify("b", None), ControlWord::Bold(true));
        assert_eq!(ControlWord::classify("b", Some(0)), ControlWord::Bold(false));
        assert_eq!(ControlWord::classify("b", Some(1)), ControlWord::Bold(true));
        assert_eq!(ControlWord::classify("i", Some(0)), ControlWord::Italic(false));
        assert_eq!(
            ControlWord::classify("ul", Some(0)),
            ControlWord::Underline(false)
        );
        assert_eq!(
            ControlWord::classify("ulnone", None),
            ControlWord::Underline(false)
        );
    }

    #[test]
    fn test_parameterized_words() {
        assert_eq!(ControlWord::classify("fs", Some(24)), ControlWord::FontSize(24));
        assert_eq!(ControlWord::classify("f", Some(2)), ControlWord::Font(2));
        assert_eq!(ControlWord::classify("cf", Some(1)), ControlWord::Foreground(1));
        assert_eq!(
            ControlWord::classify("highlight", Some(3)),
            ControlWord::Background(3)
        );
        assert_eq!(
            ControlWord::classify("ansicpg", Some(1251)),
            ControlWord::CodePage(1251)
        );
    }

    #[test]
    fn test_invalid_parameters_are_unknown() {
        assert_eq!(ControlWord::classify("fs", None), ControlWord::Unknown);
        assert_eq!(ControlWord::classify("f", Some(-1)), ControlWord::Unknown);
        assert_eq!(ControlWord::classify("u", None), ControlWord::Unknown);
        assert_eq!(
            ControlWord::classify("ansicpg", Some(70000)),
            ControlWord::Unknown
        );
    }

    #[test]
    fn test_color_components_are_clamped() {
        assert_eq!(
            ControlWord::classify("red", Some(300)),
            ControlWord::ColorComponent(ColorComponent::Red, 255)
        );
        assert_eq!(
            ControlWord::classify("blue", Some(-4)),
            ControlWord::ColorComponent(ColorComponent::Blue, 0)
        );
    }

    #[test]
    fn test_literals_and_destinations() {
        assert_eq!(ControlWord::classify("tab", None), ControlWord::Literal('\t'));
        assert_eq!(
            ControlWord::classify("bullet", None),
            ControlWord::Literal('•')
        );
        assert!(ControlWord::classify("stylesheet", None).is_destination());
        assert!(ControlWord::classify("fonttbl", None).is_destination());
        assert!(ControlWord::classify_symbol('*').is_destination());
        assert!(!ControlWord::classify("par", None).is_destination());
        assert!(ControlWord::classify("u", Some(65)).produces_text());
    }

    #[test]
    fn test_unknown_words() {
        assert_eq!(ControlWord::classify("lang", Some(1033)), ControlWord::Unknown);
        assert_eq!(ControlWord::classify_symbol('-'), ControlWord::Unknown);
        assert_eq!(
            ControlWord::classify_symbol('~'),
            ControlWord::Literal('\u{00A0}')
        );
    }
}
