pub(crate) mod rewrite;
pub(crate) mod scanner;
pub(crate) mod tokenizer;

use crate::TreeFloat;
use crate::phylo::node::{Node, NodeId};
use crate::phylo::tree::{Tree, TreeError};
use rayon::prelude::*;
use rewrite::rewrite_statement;
use scanner::TreeScanner;
use std::fmt::Display;
use thiserror::Error;
use tokenizer::tokenize;

/// Inputs with more statements than this are parsed in parallel.
const PARALLEL_STATEMENT_THRESHOLD: usize = 100;

/// Characters that cannot survive a round trip when emitted in an
/// unquoted label. Labels containing any of these are single-quoted on
/// output, with embedded quotes doubled.
const QUOTE_TRIGGERS: [char; 9] =
    ['(', ')', '[', ']', ',', ';', ':', '\'', '_'];

#[derive(Debug, Error)]
pub enum NewickError {
    #[error("Unterminated tree statement: {0:?}.")]
    UnterminatedStatement(String),
    #[error("Could not unquote token: {0:?}.")]
    UnquoteFailure(String),
    #[error("Invalid branch length: {0:?}.")]
    InvalidBranchLength(String),
    #[error("Unbalanced parentheses in tree statement.")]
    UnbalancedParentheses,
    #[error("Tree statement contains no nodes.")]
    EmptyStatement,
    #[error(transparent)]
    Tree(#[from] TreeError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Parses NEWICK formatted text into [Tree] objects, one per
/// semicolon-terminated statement.
///
/// Statements are independent of each other, so large multi-tree inputs
/// are parsed in parallel.
pub fn parse_newick(input: &str) -> Result<Vec<Tree>, NewickError> {
    let mut tree_scanner = TreeScanner::new(input.as_bytes());
    let mut statements: Vec<String> = Vec::new();
    while tree_scanner.advance()? {
        statements.push(tree_scanner.current_text().to_string());
    }
    log::debug!("scanned {} NEWICK statement(s)", statements.len());

    if statements.len() > PARALLEL_STATEMENT_THRESHOLD {
        statements.par_iter().map(|s| parse_newick_statement(s)).collect()
    } else {
        statements.iter().map(|s| parse_newick_statement(s)).collect()
    }
}

/// Parses a single semicolon-terminated NEWICK statement into a [Tree].
///
/// The statement passes through three stages: the character rewrites of
/// [rewrite_statement], the generic [tokenize] pass, and a single
/// left-to-right walk over the token sequence that links nodes into the
/// tree. Any failure aborts this statement only; the caller may continue
/// with the next one.
pub fn parse_newick_statement(statement: &str) -> Result<Tree, NewickError> {
    let rewritten = rewrite_statement(statement);
    let lexemes = tokenize(&rewritten)?;
    let tokens = process_lexemes(lexemes)?;
    build_tree(&tokens)
}

/// Unquotes quoted lexemes and applies the underscore-means-space
/// convention to unquoted ones.
fn process_lexemes(lexemes: Vec<String>) -> Result<Vec<String>, NewickError> {
    let mut tokens: Vec<String> = Vec::with_capacity(lexemes.len());
    for lexeme in lexemes {
        if lexeme.starts_with('"') {
            tokens.push(unquote(&lexeme)?);
        } else {
            tokens.push(lexeme.replace('_', " "));
        }
    }
    Ok(tokens)
}

fn unquote(lexeme: &str) -> Result<String, NewickError> {
    lexeme
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .map(str::to_string)
        .ok_or_else(|| NewickError::UnquoteFailure(lexeme.to_string()))
}

/// Builds a tree from the processed token sequence in a single
/// left-to-right pass with one cursor and no backtracking.
fn build_tree(tokens: &[String]) -> Result<Tree, NewickError> {
    let mut tree = Tree::new();
    let mut cursor: Option<NodeId> = None;

    for token in tokens {
        match token.as_str() {
            "(" => {
                let v = cursor_or_new_root(&mut tree, &mut cursor);
                let child_id = tree.add_child(v)?;
                cursor = Some(child_id);
            }
            ")" => {
                let v = cursor.ok_or(NewickError::UnbalancedParentheses)?;
                match tree.parent_id(v) {
                    Some(parent_id) => cursor = Some(parent_id),
                    None => return Err(NewickError::UnbalancedParentheses),
                }
            }
            "," => {
                let v = cursor.ok_or(NewickError::UnbalancedParentheses)?;
                let sib_id = tree.add_sibling(v)?;
                cursor = Some(sib_id);
            }
            ";" => break,
            token if token.starts_with(':') => {
                let text = &token[1..];
                let branch_length: TreeFloat = text.parse().map_err(|_| {
                    NewickError::InvalidBranchLength(text.to_string())
                })?;
                let v = cursor_or_new_root(&mut tree, &mut cursor);
                if let Some(node) = tree.node_mut(Some(v)) {
                    node.set_branch_length(Some(branch_length));
                }
            }
            token => {
                let v = cursor_or_new_root(&mut tree, &mut cursor);
                if let Some(node) = tree.node_mut(Some(v)) {
                    node.set_label(Some(token));
                }
            }
        }
    }

    // A well-formed statement leaves the cursor at the outermost node.
    match cursor {
        Some(v) if tree.parent_id(v).is_none() => {
            tree.set_root_id(Some(v));
            Ok(tree)
        }
        Some(_) => Err(NewickError::UnbalancedParentheses),
        None => Err(NewickError::EmptyStatement),
    }
}

/// The current node, creating the outermost node lazily when the first
/// token arrives before any `(`. Leaf-only statements like `A;` parse
/// through this path.
fn cursor_or_new_root(tree: &mut Tree, cursor: &mut Option<NodeId>) -> NodeId {
    match *cursor {
        Some(node_id) => node_id,
        None => {
            let node_id = tree.add_node(Node::new());
            *cursor = Some(node_id);
            node_id
        }
    }
}

/// Renders a [Tree] as canonical NEWICK text, terminated by `;`.
pub fn write_newick(tree: &Tree) -> String {
    let mut out = String::new();
    if let Some(root_id) = tree.root_id() {
        write_node(tree, root_id, &mut out);
    }
    out
}

fn write_node(tree: &Tree, node_id: NodeId, out: &mut String) {
    let parent_id = tree.parent_id(node_id);
    if let Some(parent_id) = parent_id
        && tree.first_child_id(parent_id) != Some(node_id)
    {
        out.push(',');
    }

    let child_id = tree.first_child_id(node_id);
    if child_id.is_some() {
        out.push('(');
    }
    if let Some(child_id) = child_id {
        write_node(tree, child_id, out);
    }

    write_label(tree, node_id, out);

    let sib_id = tree.next_sib_id(node_id);
    if let Some(sib_id) = sib_id {
        write_node(tree, sib_id, out);
    }

    if parent_id.is_some() && sib_id.is_none() {
        out.push(')');
    }
    if parent_id.is_none() {
        out.push(';');
    }
}

fn write_label(tree: &Tree, node_id: NodeId, out: &mut String) {
    let label = tree.label(node_id);
    let label: &str = label.as_deref().unwrap_or("");

    if label.contains(QUOTE_TRIGGERS) {
        out.push('\'');
        out.push_str(&label.replace('\'', "''"));
        out.push('\'');
    } else {
        out.push_str(&label.replace(' ', "_"));
    }

    if let Some(branch_length) = tree.branch_length(node_id) {
        out.push(':');
        out.push_str(&format_branch_length(branch_length));
    }
}

/// Formats a branch length with three significant digits: plain decimal
/// for moderate magnitudes, scientific notation otherwise, trailing zeros
/// trimmed.
fn format_branch_length(value: TreeFloat) -> String {
    const SIGNIFICANT_DIGITS: i32 = 3;

    if value == 0.0 || !value.is_finite() {
        return format!("{value}");
    }

    let exponent = value.abs().log10().floor() as i32;
    if exponent < -4 || exponent >= SIGNIFICANT_DIGITS {
        let mantissa_decimals = (SIGNIFICANT_DIGITS - 1) as usize;
        trim_scientific(&format!("{value:.mantissa_decimals$e}"))
    } else {
        let decimals = (SIGNIFICANT_DIGITS - 1 - exponent).max(0) as usize;
        trim_decimal(&format!("{value:.decimals$}"))
    }
}

fn trim_decimal(text: &str) -> String {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text.to_string()
    }
}

fn trim_scientific(text: &str) -> String {
    match text.split_once('e') {
        Some((mantissa, exponent)) => {
            format!("{}e{}", trim_decimal(mantissa), exponent)
        }
        None => text.to_string(),
    }
}

impl Display for Tree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", write_newick(self))
    }
}
