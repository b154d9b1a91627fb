use crate::syntax::lexer::{Token, TokenKind, tokenize};
use crate::syntax::source::SourceFile;

/// The node kinds that carry a parenthesized parameter or argument list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    MethodDeclaration,
    ConstructorDeclaration,
    InvocationExpression,
    ObjectCreationExpression,
}

/// An open-parenthesis/close-parenthesis pair bracketing zero or more items.
///
/// `items` holds the start token of each top-level comma-separated item.
/// Both delimiters are always present: lists whose closing parenthesis
/// cannot be found in the source never become nodes.
#[derive(Debug, Clone)]
pub struct ItemList {
    pub open: Token,
    pub items: Vec<Token>,
    pub close: Token,
}

#[derive(Debug, Clone)]
pub struct ListNode {
    pub kind: NodeKind,
    pub list: ItemList,
}

/// The parenthesized-list view of a source file: every method declaration,
/// constructor declaration, invocation, and object-creation expression,
/// in source order of the construct's name token (equivalently, of its
/// opening parenthesis — a linear scan visits nested lists depth-first,
/// left to right).
#[derive(Debug)]
pub struct SyntaxTree {
    nodes: Vec<ListNode>,
}

/// Keywords that take a parenthesized clause which is none of the four
/// node kinds.
const NON_CALL_KEYWORDS: &[&str] = &[
    "if", "while", "for", "foreach", "switch", "catch", "using", "lock", "fixed", "return",
    "base", "this", "nameof", "typeof", "sizeof", "default", "checked", "unchecked", "when",
    "throw", "out", "ref", "in", "is", "as",
];

const MODIFIER_KEYWORDS: &[&str] = &[
    "public", "private", "protected", "internal", "static", "sealed", "override", "virtual",
    "abstract", "async", "extern", "unsafe", "partial", "readonly",
];

const TYPE_KEYWORDS: &[&str] = &["class", "struct", "interface", "record", "enum"];

struct TypeScope {
    name: Vec<u8>,
    body_depth: usize,
}

impl SyntaxTree {
    pub fn parse(source: &SourceFile) -> SyntaxTree {
        let tokens = tokenize(source);
        let mut nodes = Vec::new();

        let mut brace_depth = 0usize;
        let mut type_stack: Vec<TypeScope> = Vec::new();
        let mut pending_type: Option<Vec<u8>> = None;

        let mut i = 0;
        while i < tokens.len() {
            match tokens[i].kind {
                TokenKind::LBrace => {
                    brace_depth += 1;
                    if let Some(name) = pending_type.take() {
                        type_stack.push(TypeScope {
                            name,
                            body_depth: brace_depth,
                        });
                    }
                }
                TokenKind::RBrace => {
                    if type_stack
                        .last()
                        .is_some_and(|scope| scope.body_depth == brace_depth)
                    {
                        type_stack.pop();
                    }
                    brace_depth = brace_depth.saturating_sub(1);
                }
                TokenKind::Semicolon => {
                    // `class Foo;` never opens a body
                    pending_type = None;
                }
                TokenKind::Ident => {
                    let text = tokens[i].text(source);
                    if TYPE_KEYWORDS.contains(&ident_str(text)) {
                        if let Some(name_tok) = tokens.get(i + 1) {
                            if name_tok.kind == TokenKind::Ident {
                                pending_type = Some(name_tok.text(source).to_vec());
                                // Skip the name so a record primary-constructor
                                // list is not mistaken for a call.
                                i += 2;
                                continue;
                            }
                        }
                    } else if let Some(node) =
                        try_node_at(source, &tokens, i, brace_depth, &type_stack)
                    {
                        nodes.push(node);
                    }
                }
                _ => {}
            }
            i += 1;
        }

        SyntaxTree { nodes }
    }

    pub fn nodes(&self) -> &[ListNode] {
        &self.nodes
    }
}

fn ident_str(text: &[u8]) -> &str {
    std::str::from_utf8(text).unwrap_or("")
}

/// If the identifier at `i` names one of the four list-bearing constructs,
/// extract its item list.
fn try_node_at(
    source: &SourceFile,
    tokens: &[Token],
    i: usize,
    brace_depth: usize,
    type_stack: &[TypeScope],
) -> Option<ListNode> {
    let name = tokens[i].text(source);
    if NON_CALL_KEYWORDS.contains(&ident_str(name)) || ident_str(name) == "new" {
        return None;
    }

    // The opening parenthesis follows the name, possibly across a generic
    // type-argument list.
    let mut open_idx = i + 1;
    if is_op(tokens.get(open_idx), source, b'<') {
        open_idx = skip_type_arguments(source, tokens, open_idx)?;
    }
    if tokens.get(open_idx)?.kind != TokenKind::LParen {
        return None;
    }

    let kind = classify(source, tokens, i, brace_depth, type_stack);
    let list = extract_item_list(tokens, open_idx)?;
    Some(ListNode { kind, list })
}

fn is_op(token: Option<&Token>, source: &SourceFile, byte: u8) -> bool {
    token.is_some_and(|t| t.kind == TokenKind::Op && t.op_byte(source) == byte)
}

/// Skip a `<...>` type-argument list starting at `open`, returning the index
/// just past the closing `>`. Only type-ish tokens may appear inside;
/// anything else means `<` was a comparison, not a type-argument list.
fn skip_type_arguments(source: &SourceFile, tokens: &[Token], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut j = open;
    while j < tokens.len() {
        let t = &tokens[j];
        match t.kind {
            TokenKind::Op if t.op_byte(source) == b'<' => depth += 1,
            TokenKind::Op if t.op_byte(source) == b'>' => {
                depth -= 1;
                if depth == 0 {
                    return Some(j + 1);
                }
            }
            TokenKind::Op if t.op_byte(source) == b'?' => {}
            TokenKind::Ident
            | TokenKind::Dot
            | TokenKind::Comma
            | TokenKind::LBracket
            | TokenKind::RBracket => {}
            _ => return None,
        }
        j += 1;
    }
    None
}

fn classify(
    source: &SourceFile,
    tokens: &[Token],
    i: usize,
    brace_depth: usize,
    type_stack: &[TypeScope],
) -> NodeKind {
    // `new Name(` or `new Qualified.Name(`
    if preceded_by_new(source, tokens, i) {
        return NodeKind::ObjectCreationExpression;
    }

    // A receiver (`x.Foo(`) always means a call.
    if i > 0 && tokens[i - 1].kind == TokenKind::Dot {
        return NodeKind::InvocationExpression;
    }

    // Member declarations sit directly inside a type body and their header
    // (everything back to the previous statement boundary) holds only
    // modifiers and type syntax.
    if let Some(scope) = type_stack.last() {
        if scope.body_depth == brace_depth {
            if let Some(non_modifier_header_tokens) = declaration_header(source, tokens, i) {
                return if non_modifier_header_tokens == 0 && tokens[i].text(source) == scope.name {
                    NodeKind::ConstructorDeclaration
                } else {
                    NodeKind::MethodDeclaration
                };
            }
        }
    }

    NodeKind::InvocationExpression
}

fn preceded_by_new(source: &SourceFile, tokens: &[Token], i: usize) -> bool {
    let mut k = i;
    // Walk back over `Ident.` qualifier segments.
    while k >= 2 && tokens[k - 1].kind == TokenKind::Dot && tokens[k - 2].kind == TokenKind::Ident {
        k -= 2;
    }
    k >= 1 && tokens[k - 1].kind == TokenKind::Ident && tokens[k - 1].text(source) == b"new"
}

/// Inspect the tokens between the previous statement boundary and the name
/// at `i`. Returns the count of header tokens that are not modifier
/// keywords (i.e. return-type syntax) when the stretch looks like a
/// declaration header, or `None` when it contains expression syntax.
fn declaration_header(source: &SourceFile, tokens: &[Token], i: usize) -> Option<usize> {
    let mut non_modifiers = 0usize;
    let mut k = i;
    while k > 0 {
        let t = &tokens[k - 1];
        match t.kind {
            TokenKind::Semicolon | TokenKind::LBrace | TokenKind::RBrace | TokenKind::RBracket => {
                break;
            }
            TokenKind::Ident => {
                if !MODIFIER_KEYWORDS.contains(&ident_str(t.text(source))) {
                    non_modifiers += 1;
                }
            }
            TokenKind::Dot | TokenKind::LBracket => {}
            TokenKind::Op => {
                let b = t.op_byte(source);
                // Generic and nullable/pointer type syntax is fine in a
                // return type; anything else is an expression.
                if !matches!(b, b'<' | b'>' | b'?' | b'*') {
                    return None;
                }
            }
            _ => return None,
        }
        k -= 1;
    }
    Some(non_modifiers)
}

/// Extract the item list opened at `open_idx`. Returns `None` when the
/// closing parenthesis is missing (malformed source degrades to "no node",
/// never to a panic).
fn extract_item_list(tokens: &[Token], open_idx: usize) -> Option<ItemList> {
    let open = tokens[open_idx];
    let mut items = Vec::new();
    let mut paren_depth = 1usize;
    let mut bracket_depth = 0usize;
    let mut brace_depth = 0usize;
    let mut at_item_start = true;

    let mut j = open_idx + 1;
    while j < tokens.len() {
        let t = tokens[j];
        match t.kind {
            TokenKind::RParen if paren_depth == 1 && bracket_depth == 0 && brace_depth == 0 => {
                return Some(ItemList {
                    open,
                    items,
                    close: t,
                });
            }
            TokenKind::LParen => paren_depth += 1,
            TokenKind::RParen => paren_depth = paren_depth.saturating_sub(1),
            TokenKind::LBracket => bracket_depth += 1,
            TokenKind::RBracket => bracket_depth = bracket_depth.saturating_sub(1),
            TokenKind::LBrace => brace_depth += 1,
            TokenKind::RBrace => brace_depth = brace_depth.saturating_sub(1),
            TokenKind::Comma if paren_depth == 1 && bracket_depth == 0 && brace_depth == 0 => {
                at_item_start = true;
                j += 1;
                continue;
            }
            _ => {}
        }
        if at_item_start {
            items.push(t);
            at_item_start = false;
        }
        j += 1;
    }
    None
}
