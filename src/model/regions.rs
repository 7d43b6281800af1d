//! Conditional-compilation regions as a tree of tagged member lists.

use proc_macro2::TokenStream;
use std::fmt;

/// The predicate inside one `#[cfg(..)]` attribute.
#[derive(Clone)]
pub struct CfgPredicate {
    tokens: TokenStream,
    text: String,
}

impl CfgPredicate {
    pub fn new(tokens: TokenStream) -> Self {
        let text = tokens.to_string();
        Self { tokens, text }
    }

    pub fn tokens(&self) -> &TokenStream {
        &self.tokens
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl PartialEq for CfgPredicate {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for CfgPredicate {}

impl fmt::Debug for CfgPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cfg({})", self.text)
    }
}

impl fmt::Display for CfgPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionNode {
    /// Index into the declaration's member list.
    Member(usize),
    Region {
        predicate: CfgPredicate,
        children: Vec<RegionNode>,
    },
}

/// Members in source order, nested under the regions that enclose them.
///
/// Consecutive members whose predicate chains share a prefix share the
/// corresponding region nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionTree {
    pub nodes: Vec<RegionNode>,
}

impl RegionTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, member: usize, chain: &[CfgPredicate]) {
        insert_into(&mut self.nodes, member, chain);
    }

    /// Member indices in the order a depth-first walk visits them.
    pub fn member_order(&self) -> Vec<usize> {
        let mut order = Vec::new();
        collect_members(&self.nodes, &mut order);
        order
    }

    pub fn depth(&self) -> usize {
        max_depth(&self.nodes)
    }
}

fn insert_into(nodes: &mut Vec<RegionNode>, member: usize, chain: &[CfgPredicate]) {
    let Some((outer, rest)) = chain.split_first() else {
        nodes.push(RegionNode::Member(member));
        return;
    };

    if let Some(RegionNode::Region {
        predicate,
        children,
    }) = nodes.last_mut()
    {
        if predicate == outer {
            insert_into(children, member, rest);
            return;
        }
    }

    let mut children = Vec::new();
    insert_into(&mut children, member, rest);
    nodes.push(RegionNode::Region {
        predicate: outer.clone(),
        children,
    });
}

fn collect_members(nodes: &[RegionNode], order: &mut Vec<usize>) {
    for node in nodes {
        match node {
            RegionNode::Member(index) => order.push(*index),
            RegionNode::Region { children, .. } => collect_members(children, order),
        }
    }
}

fn max_depth(nodes: &[RegionNode]) -> usize {
    nodes
        .iter()
        .map(|node| match node {
            RegionNode::Member(_) => 0,
            RegionNode::Region { children, .. } => 1 + max_depth(children),
        })
        .max()
        .unwrap_or(0)
}
