/// Character rewrites applied to a raw statement before tokenizing.
///
/// The pass order is load-bearing: the doubled-quote collapse must run
/// after the quote substitution so an escaped quote survives as a literal,
/// and the synthetic quoting of branch lengths must see the final quote
/// characters.
///
/// 1. `[` becomes `/*` and `]` becomes `*/`, turning bracketed NEWICK
///    comments into block comments the tokenizer consumes.
/// 2. `'` becomes `"`, the quote character the tokenizer expects.
/// 3. `""` (originally `''`, an escaped quote) collapses back to `'`.
/// 4. Every `:length` run is wrapped in synthetic quotes.
pub(crate) fn rewrite_statement(statement: &str) -> String {
    let statement = statement.replace('[', "/*").replace(']', "*/");
    let statement = statement.replace('\'', "\"");
    let statement = statement.replace("\"\"", "'");
    quote_branch_lengths(&statement)
}

/// Wraps every branch-length run in synthetic quotes so the tokenizer
/// keeps `:1.23` as one atom instead of splitting on the colon. A `:`
/// enters in-number mode; the first of `,` `;` ` ` `)` seen in that mode
/// leaves it.
fn quote_branch_lengths(statement: &str) -> String {
    let mut out = String::with_capacity(statement.len() + 2);
    let mut in_number = false;
    for character in statement.chars() {
        if character == ':' {
            in_number = true;
            out.push('"');
        }
        if in_number && matches!(character, ',' | ';' | ' ' | ')') {
            in_number = false;
            out.push('"');
        }
        out.push(character);
    }
    out
}
