//! The six unfoldable statement shapes.

use std::fmt;

/// The operation that consumes the conditional's value.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Consumer {
    Assignment,
    Return,
    Declaration,
}

/// Conditional shape.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Shape {
    If,
    When,
}

/// An eligible (consumer, conditional) pair.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnfoldableKind {
    AssignmentToIf,
    AssignmentToWhen,
    ReturnToIf,
    ReturnToWhen,
    DeclarationToIf,
    DeclarationToWhen,
}

impl UnfoldableKind {
    pub const ALL: [UnfoldableKind; 6] = [
        UnfoldableKind::AssignmentToIf,
        UnfoldableKind::AssignmentToWhen,
        UnfoldableKind::ReturnToIf,
        UnfoldableKind::ReturnToWhen,
        UnfoldableKind::DeclarationToIf,
        UnfoldableKind::DeclarationToWhen,
    ];

    pub fn new(consumer: Consumer, shape: Shape) -> Self {
        match (consumer, shape) {
            (Consumer::Assignment, Shape::If) => UnfoldableKind::AssignmentToIf,
            (Consumer::Assignment, Shape::When) => UnfoldableKind::AssignmentToWhen,
            (Consumer::Return, Shape::If) => UnfoldableKind::ReturnToIf,
            (Consumer::Return, Shape::When) => UnfoldableKind::ReturnToWhen,
            (Consumer::Declaration, Shape::If) => UnfoldableKind::DeclarationToIf,
            (Consumer::Declaration, Shape::When) => UnfoldableKind::DeclarationToWhen,
        }
    }

    pub fn consumer(self) -> Consumer {
        match self {
            UnfoldableKind::AssignmentToIf | UnfoldableKind::AssignmentToWhen => {
                Consumer::Assignment
            }
            UnfoldableKind::ReturnToIf | UnfoldableKind::ReturnToWhen => Consumer::Return,
            UnfoldableKind::DeclarationToIf | UnfoldableKind::DeclarationToWhen => {
                Consumer::Declaration
            }
        }
    }

    pub fn shape(self) -> Shape {
        match self {
            UnfoldableKind::AssignmentToIf
            | UnfoldableKind::ReturnToIf
            | UnfoldableKind::DeclarationToIf => Shape::If,
            UnfoldableKind::AssignmentToWhen
            | UnfoldableKind::ReturnToWhen
            | UnfoldableKind::DeclarationToWhen => Shape::When,
        }
    }

    /// Action title shown to users.
    pub fn title(self) -> &'static str {
        match self {
            UnfoldableKind::AssignmentToIf => "Replace assignment with 'if' expression",
            UnfoldableKind::AssignmentToWhen => "Replace assignment with 'when' expression",
            UnfoldableKind::ReturnToIf => "Replace return with 'if' expression",
            UnfoldableKind::ReturnToWhen => "Replace return with 'when' expression",
            UnfoldableKind::DeclarationToIf => "Split declaration and 'if' initializer",
            UnfoldableKind::DeclarationToWhen => "Split declaration and 'when' initializer",
        }
    }
}

impl fmt::Display for UnfoldableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_decomposes_into_its_parts() {
        for kind in UnfoldableKind::ALL {
            assert_eq!(UnfoldableKind::new(kind.consumer(), kind.shape()), kind);
        }
    }
}
