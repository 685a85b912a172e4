//! Keyboard markup attached to outgoing messages.

/// A single tappable button on an inline keyboard.
///
/// The `data` string comes back verbatim in a callback event when the user
/// taps the button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineButton {
    /// Text shown on the button.
    pub label: String,
    /// Opaque payload returned on tap.
    pub data: String,
}

impl InlineButton {
    #[must_use]
    pub fn new(label: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            data: data.into(),
        }
    }
}

/// Keyboard markup variants the platform supports for outgoing messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyMarkup {
    /// Buttons attached to the message itself; taps come back as callbacks.
    Inline { rows: Vec<Vec<InlineButton>> },
    /// A reply keyboard shown under the user's input field; taps come back
    /// as ordinary text messages.
    Keyboard { rows: Vec<Vec<String>> },
    /// Removes any previously shown reply keyboard.
    Remove,
}

impl ReplyMarkup {
    /// Builds an inline keyboard with one button per row.
    #[must_use]
    pub fn inline_column(buttons: Vec<InlineButton>) -> Self {
        Self::Inline {
            rows: buttons.into_iter().map(|b| vec![b]).collect(),
        }
    }

    /// Builds a reply keyboard with one text button per row.
    #[must_use]
    pub fn keyboard_column(labels: Vec<String>) -> Self {
        Self::Keyboard {
            rows: labels.into_iter().map(|l| vec![l]).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_column_puts_each_button_on_its_own_row() {
        let markup = ReplyMarkup::inline_column(vec![
            InlineButton::new("Chilonzor", "setstation:1:7"),
            InlineButton::new("Buyuk Ipak Yo'li", "setstation:1:12"),
        ]);
        let ReplyMarkup::Inline { rows } = markup else {
            panic!("expected inline markup");
        };
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), 1);
        assert_eq!(rows[1][0].data, "setstation:1:12");
    }

    #[test]
    fn keyboard_column_keeps_label_order() {
        let markup =
            ReplyMarkup::keyboard_column(vec!["1".to_string(), "2".to_string(), "3".to_string()]);
        let ReplyMarkup::Keyboard { rows } = markup else {
            panic!("expected reply keyboard");
        };
        assert_eq!(rows.iter().flatten().collect::<Vec<_>>(), ["1", "2", "3"]);
    }
}
