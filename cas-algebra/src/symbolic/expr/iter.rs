use super::{Expr, Primary};

/// An iterator that iteratively traverses the tree of expressions in left-to-right post-order
/// (i.e. depth-first). Function arguments and both sides of a relation are visited as children.
///
/// This iterator is created by [`Expr::post_order_iter`].
pub struct ExprIter<'a> {
    stack: Vec<&'a Expr>,
    last_visited: Option<&'a Expr>,
}

impl<'a> ExprIter<'a> {
    /// Creates a new iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn new(expr: &'a Expr) -> Self {
        Self {
            stack: vec![expr],
            last_visited: None,
        }
    }

    /// Pops the current expression in the stack and marks it as the last visited expression.
    fn visit(&mut self) -> Option<&'a Expr> {
        self.last_visited = Some(self.stack.pop()?);
        self.last_visited
    }

    /// Returns true if the given expression matches the last visited expression.
    fn is_last_visited(&self, expr: &'a Expr) -> bool {
        match self.last_visited {
            Some(last_visited) => std::ptr::eq(last_visited, expr),
            None => false,
        }
    }

    /// Visits the node on top of the stack if all of `children` were visited already, otherwise
    /// pushes them so that the leftmost child is visited next.
    fn visit_or_descend(&mut self, children: &'a [Expr]) -> Option<Option<&'a Expr>> {
        match children.last() {
            Some(last) if !self.is_last_visited(last) => {
                self.stack.extend(children.iter().rev());
                None
            },
            _ => Some(self.visit()),
        }
    }
}

impl<'a> Iterator for ExprIter<'a> {
    type Item = &'a Expr;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let expr = *self.stack.last()?;
            match expr {
                Expr::Primary(Primary::Call(_, args)) => {
                    if let Some(visited) = self.visit_or_descend(args) {
                        return visited;
                    }
                },
                Expr::Primary(_) => return self.visit(),
                Expr::Add(exprs) | Expr::Mul(exprs) => {
                    if let Some(visited) = self.visit_or_descend(exprs) {
                        return visited;
                    }
                },
                Expr::Exp(lhs, rhs) | Expr::Relation(lhs, rhs, _) => {
                    if self.is_last_visited(rhs) {
                        return self.visit();
                    }
                    self.stack.push(rhs);
                    self.stack.push(lhs);
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn post_order() {
        // sin(x) * y^2 + 3
        let expr = Expr::add([
            Expr::mul([
                Expr::func("sin", [Expr::var("x")]),
                Expr::pow(Expr::var("y"), Expr::int(2)),
            ]),
            Expr::int(3),
        ]);
        let visited = expr.post_order_iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>();
        assert_eq!(visited, vec![
            "x",
            "sin(x)",
            "y",
            "2",
            "y^2",
            "sin(x)*y^2",
            "3",
            "sin(x)*y^2+3",
        ]);
    }

    #[test]
    fn empty_composites() {
        let expr = Expr::mul([Expr::add([]), Expr::func("f", [])]);
        assert_eq!(expr.post_order_iter().count(), 3);
    }
}
