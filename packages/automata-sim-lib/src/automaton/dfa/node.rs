/// A named state in a DFA.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StateNode {
    pub name: String,
    pub accepting: bool,
}

impl StateNode {
    pub fn new(name: impl Into<String>, accepting: bool) -> Self {
        StateNode {
            name: name.into(),
            accepting,
        }
    }

    pub fn accepting(name: impl Into<String>) -> Self {
        StateNode::new(name, true)
    }

    pub fn non_accepting(name: impl Into<String>) -> Self {
        StateNode::new(name, false)
    }
}
