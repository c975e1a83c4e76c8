/// Element tag of a document node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Tag {
    #[default]
    Div,
    Span,
    Form,
    Select,
    Option,
    OptGroup,
    Input,
    Textarea,
    Button,
    Other(String),
}

impl Tag {
    /// Parse a tag name as it appears in markup (case-insensitive).
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "div" => Tag::Div,
            "span" => Tag::Span,
            "form" => Tag::Form,
            "select" => Tag::Select,
            "option" => Tag::Option,
            "optgroup" => Tag::OptGroup,
            "input" => Tag::Input,
            "textarea" => Tag::Textarea,
            "button" => Tag::Button,
            other => Tag::Other(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Tag::Div => "div",
            Tag::Span => "span",
            Tag::Form => "form",
            Tag::Select => "select",
            Tag::Option => "option",
            Tag::OptGroup => "optgroup",
            Tag::Input => "input",
            Tag::Textarea => "textarea",
            Tag::Button => "button",
            Tag::Other(name) => name,
        }
    }

    /// Tags that take part in keyboard focus order by default.
    pub fn is_form_control(&self) -> bool {
        matches!(
            self,
            Tag::Select | Tag::Input | Tag::Textarea | Tag::Button
        )
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
