//! Stack of open aggregate tags awaiting closure.

use super::emit::StartTag;

/// Open-tag stack with strict LIFO discipline.
///
/// Holds the aggregate tags whose end tag has not been seen yet; an
/// aggregate close token unwinds it top-down until the names match or the
/// stack runs out.
#[derive(Clone, Debug, Default)]
pub(crate) struct TagStack {
    items: Vec<StartTag>,
}

impl TagStack {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, tag: StartTag) {
        self.items.push(tag);
    }

    pub(crate) fn pop(&mut self) -> Option<StartTag> {
        self.items.pop()
    }

    #[allow(dead_code, reason = "stack API completeness; exercised in tests")]
    pub(crate) fn peek(&self) -> Option<&StartTag> {
        self.items.last()
    }

    #[allow(dead_code, reason = "stack API completeness; exercised in tests")]
    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Open tag names, outermost first, for diagnostics.
    pub(crate) fn snapshot(&self) -> Vec<&str> {
        self.items.iter().map(|tag| tag.name()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::super::emit::StartTag;
    use super::TagStack;

    #[test]
    fn new_stack_is_empty() {
        let stack = TagStack::new();
        assert!(stack.is_empty());
        assert_eq!(stack.len(), 0);
        assert!(stack.peek().is_none());
        assert!(stack.snapshot().is_empty());
    }

    #[test]
    fn push_and_pop_are_lifo() {
        let mut stack = TagStack::new();
        stack.push(StartTag::from_name("OFX"));
        stack.push(StartTag::from_name("STATUS"));
        assert!(!stack.is_empty());
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.peek().map(StartTag::name), Some("STATUS"));
        assert_eq!(stack.snapshot(), vec!["OFX", "STATUS"]);

        assert_eq!(stack.pop().as_ref().map(StartTag::name), Some("STATUS"));
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.pop().as_ref().map(StartTag::name), Some("OFX"));
        assert!(stack.is_empty());
    }

    #[test]
    fn pop_on_empty_stack_returns_none() {
        let mut stack = TagStack::new();
        assert!(stack.pop().is_none());
    }
}
