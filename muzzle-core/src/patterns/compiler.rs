// muzzle-core/src/patterns/compiler.rs
//! Compiles parsed patterns into executable search programs.
//!
//! Compilation is a straight lowering of the AST onto the instruction set
//! interpreted by [`crate::patterns::vm`]: literals become per-codepoint
//! `Char` instructions, a wildcard becomes `AnyChar`, an optional becomes a
//! greedy `Split` around its child's instructions, and boundary
//! requirements become `WordBoundary` anchors at the program edges.
//!
//! License: MIT OR APACHE 2.0

use log::debug;

use crate::patterns::ast::{Node, Pattern};
use crate::patterns::vm::{Inst, Program};

/// Returns `true` when the pattern could match the empty string.
///
/// A `Wildcard` or `Literal` node anywhere guarantees at least one consumed
/// codepoint; boundary assertions consume nothing, so a pattern whose nodes
/// are all skippable (including the empty node list) matches empty.
pub fn potentially_matches_empty_string(pattern: &Pattern) -> bool {
    !pattern
        .nodes
        .iter()
        .any(|node| matches!(node, Node::Literal(_) | Node::Wildcard))
}

/// Lowers a pattern to its search program.
///
/// Matcher construction rejects empty-matchable patterns before calling
/// this, so every compiled program consumes at least one codepoint per
/// match.
pub fn compile(pattern: &Pattern) -> Program {
    let mut insts = Vec::new();
    if pattern.require_word_boundary_at_start {
        insts.push(Inst::WordBoundary);
    }
    for node in &pattern.nodes {
        compile_node(node, &mut insts);
    }
    if pattern.require_word_boundary_at_end {
        insts.push(Inst::WordBoundary);
    }
    insts.push(Inst::Match);
    debug!("Compiled pattern with {} nodes into {} instructions.", pattern.nodes.len(), insts.len());
    Program::new(insts)
}

fn compile_node(node: &Node, insts: &mut Vec<Inst>) {
    match node {
        Node::Literal(chars) => insts.extend(chars.iter().map(|&c| Inst::Char(c))),
        Node::Wildcard => insts.push(Inst::AnyChar),
        Node::BoundaryAssertion => insts.push(Inst::WordBoundary),
        Node::Optional(child) => {
            let split_at = insts.len();
            insts.push(Inst::Split { alt: 0 });
            compile_node(child, insts);
            let after = insts.len();
            insts[split_at] = Inst::Split { alt: after };
        }
    }
}
