//! Menu-text routing.
//!
//! A menu source is outline text: one item per line, `- ` bullets, nesting
//! by indentation, a trailing `/` on items that can be expanded. Items
//! prefixed with `.` name actions.
//!
//! ```text
//! - .add/
//! - docs/
//!   - intro/
//! - .list/
//! ```
//!
//! The dispatcher asks a [`MenuRouter`] two questions about such text:
//! what lies under the path the args spell out ([`children`](MenuRouter::children)),
//! and which args matched action items ([`dotify`](MenuRouter::dotify)).

use crate::text::unindent;

/// What a router returns from `children` when the path matched nothing.
pub const NO_CHILDREN: &str = "- */\n";

/// Routes args through menu text.
pub trait MenuRouter: Send + Sync {
    /// The text under the item the args lead to, if there is any.
    fn children(&self, text: &str, args: &[String]) -> Option<String>;

    /// For each arg, whether it was consumed as an action item.
    fn dotify(&self, text: &str, args: &[String]) -> Vec<bool>;
}

/// A router that never matches.
///
/// Every handler goes straight to action resolution with all args as
/// variables.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRouting;

impl MenuRouter for NoRouting {
    fn children(&self, _text: &str, _args: &[String]) -> Option<String> {
        None
    }

    fn dotify(&self, _text: &str, args: &[String]) -> Vec<bool> {
        vec![false; args.len()]
    }
}

/// Routes through indented `- item/` outlines.
///
/// With no args the whole menu is shown. Otherwise each arg must match an
/// item at the next level down, with or without the item's leading `.`.
/// `children` answers with the matched item's sub-items, or `None` when the
/// item is a leaf. A path that leaves the outline yields [`NO_CHILDREN`].
#[derive(Debug, Clone, Copy, Default)]
pub struct OutlineRouter;

impl MenuRouter for OutlineRouter {
    fn children(&self, text: &str, args: &[String]) -> Option<String> {
        let outline = Outline::parse(text);
        if args.is_empty() {
            return Some(outline.render(&outline.roots));
        }
        let walk = outline.walk(args);
        if walk.matched < args.len() {
            return Some(NO_CHILDREN.to_string());
        }
        let node = walk.last?;
        let kids = &outline.nodes[node].children;
        if kids.is_empty() {
            None
        } else {
            Some(outline.render(kids))
        }
    }

    fn dotify(&self, text: &str, args: &[String]) -> Vec<bool> {
        let outline = Outline::parse(text);
        let walk = outline.walk(args);
        let mut flags = walk.dotted;
        flags.resize(args.len(), false);
        flags
    }
}

struct Node {
    label: String,
    line: String,
    children: Vec<usize>,
}

impl Node {
    fn matches(&self, arg: &str) -> bool {
        let arg = arg.trim_end_matches('/');
        self.label == arg || self.label.strip_prefix('.') == Some(arg)
    }

    fn is_dotted(&self) -> bool {
        self.label.starts_with('.')
    }
}

struct Outline {
    nodes: Vec<Node>,
    roots: Vec<usize>,
}

struct Walk {
    matched: usize,
    last: Option<usize>,
    dotted: Vec<bool>,
}

impl Outline {
    fn parse(text: &str) -> Self {
        let text = unindent(text);
        let mut nodes: Vec<Node> = Vec::new();
        let mut roots = Vec::new();
        // (indent, node index) of the open ancestors.
        let mut stack: Vec<(usize, usize)> = Vec::new();

        for line in text.lines() {
            if line.trim().is_empty() {
                continue;
            }
            let body = line.trim_start();
            let indent = line.len() - body.len();
            let label = body
                .strip_prefix("- ")
                .or_else(|| body.strip_prefix("+ "))
                .unwrap_or(body)
                .trim_end()
                .trim_end_matches('/')
                .to_string();

            while stack.last().is_some_and(|(i, _)| *i >= indent) {
                stack.pop();
            }

            let idx = nodes.len();
            nodes.push(Node {
                label,
                line: line.to_string(),
                children: Vec::new(),
            });
            match stack.last() {
                Some((_, parent)) => nodes[*parent].children.push(idx),
                None => roots.push(idx),
            }
            stack.push((indent, idx));
        }

        Self { nodes, roots }
    }

    fn walk(&self, args: &[String]) -> Walk {
        let mut level = &self.roots;
        let mut walk = Walk {
            matched: 0,
            last: None,
            dotted: Vec::new(),
        };
        for arg in args {
            let Some(&hit) = level.iter().find(|i| self.nodes[**i].matches(arg)) else {
                break;
            };
            walk.matched += 1;
            walk.last = Some(hit);
            walk.dotted.push(self.nodes[hit].is_dotted());
            level = &self.nodes[hit].children;
        }
        walk
    }

    fn render(&self, level: &[usize]) -> String {
        let mut out = String::new();
        for &idx in level {
            self.render_into(idx, &mut out);
        }
        unindent(&out)
    }

    fn render_into(&self, idx: usize, out: &mut String) {
        out.push_str(&self.nodes[idx].line);
        out.push('\n');
        for &child in &self.nodes[idx].children {
            self.render_into(child, out);
        }
    }
}
