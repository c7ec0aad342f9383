//! Node stack for depth-first tree exploration.

/// LIFO stack of open nodes.
///
/// Generic over the node type so both drivers share it.
#[derive(Debug, Clone)]
pub struct NodeStack<N> {
    /// Open nodes; the last element is popped first.
    nodes: Vec<N>,

    /// Count of nodes added.
    nodes_added: u64,

    /// Count of nodes popped.
    nodes_popped: u64,
}

impl<N> Default for NodeStack<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> NodeStack<N> {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            nodes_added: 0,
            nodes_popped: 0,
        }
    }

    /// Add a node to the stack.
    pub fn push(&mut self, node: N) {
        self.nodes.push(node);
        self.nodes_added += 1;
    }

    /// Get the next node to process.
    pub fn pop(&mut self) -> Option<N> {
        let node = self.nodes.pop()?;
        self.nodes_popped += 1;
        Some(node)
    }

    /// Check if the stack is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the number of open nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Get the total number of nodes added.
    pub fn total_added(&self) -> u64 {
        self.nodes_added
    }

    /// Get the total number of nodes popped.
    pub fn total_popped(&self) -> u64 {
        self.nodes_popped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifo_order() {
        let mut stack = NodeStack::new();
        stack.push(1);
        stack.push(2);
        stack.push(3);

        assert_eq!(stack.len(), 3);
        assert_eq!(stack.pop(), Some(3));
        assert_eq!(stack.pop(), Some(2));

        stack.push(4);
        assert_eq!(stack.pop(), Some(4));
        assert_eq!(stack.pop(), Some(1));
        assert_eq!(stack.pop(), None);
        assert!(stack.is_empty());
    }

    #[test]
    fn test_counters() {
        let mut stack = NodeStack::new();
        stack.push("a");
        stack.push("b");
        stack.pop();

        assert_eq!(stack.total_added(), 2);
        assert_eq!(stack.total_popped(), 1);

        // Popping an empty stack does not count
        stack.pop();
        stack.pop();
        assert_eq!(stack.total_popped(), 2);
    }
}
