use crate::api::{Origin, Payload, Source};
use std::fmt;

/// One line of container content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Text(String),
    Field { key: String, value: String },
}

impl Block {
    pub fn line(&self) -> String {
        match self {
            Block::Text(text) => text.clone(),
            Block::Field { key, value } => format!("{}: {}", key, value),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusKind {
    #[default]
    Success,
    Failure,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Background {
    #[default]
    Default,
    Success,
    Failure,
}

impl Background {
    /// CSS color, or `None` for the stylesheet default
    pub fn color(&self) -> Option<&'static str> {
        match self {
            Background::Default => None,
            Background::Success => Some("#eafaf1"),
            Background::Failure => Some("#fadbd8"),
        }
    }
}

impl From<StatusKind> for Background {
    fn from(kind: StatusKind) -> Self {
        match kind {
            StatusKind::Success => Background::Success,
            StatusKind::Failure => Background::Failure,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceTag {
    pub origin: Origin,
    pub text: String,
}

impl SourceTag {
    pub fn new(source: &Source) -> Self {
        Self {
            origin: source.origin,
            text: format!("Fuente: {}", source.label),
        }
    }

    pub fn class(&self) -> &'static str {
        self.origin.css_class()
    }
}

/// Everything a surface needs to draw one container
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Panel {
    pub blocks: Vec<Block>,
    pub tag: Option<SourceTag>,
    pub background: Background,
}

impl Panel {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn result(payload: &Payload, source: &Source) -> Self {
        let blocks = match payload {
            Payload::Text(text) => vec![Block::Text(text.clone())],
            Payload::Fields(fields) => fields
                .iter()
                .map(|f| Block::Field {
                    key: f.key.clone(),
                    value: f.value.clone(),
                })
                .collect(),
        };

        Self {
            blocks,
            tag: Some(SourceTag::new(source)),
            background: Background::Default,
        }
    }

    pub fn status(message: &str, kind: StatusKind) -> Self {
        Self {
            blocks: vec![Block::Text(message.to_string())],
            tag: None,
            background: kind.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty() && self.tag.is_none()
    }

    pub fn lines(&self) -> Vec<String> {
        self.blocks.iter().map(Block::line).collect()
    }
}

impl fmt::Display for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for block in &self.blocks {
            writeln!(f, "{}", block.line())?;
        }
        if let Some(tag) = &self.tag {
            writeln!(f, "[{}] {}", tag.class(), tag.text)?;
        }
        Ok(())
    }
}
