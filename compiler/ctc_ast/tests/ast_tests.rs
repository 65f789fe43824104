use ctc_ast::visit::{walk, VisitResult, Visitor};
use ctc_ast::{Ast, AstError, AstPrinter, Node, NodeId, NodeKind};
use pretty_assertions::assert_eq;

/// A test visitor that counts the number of nodes visited
struct NodeCounter {
    count: usize,
}

impl Visitor for NodeCounter {
    type Output = ();

    fn visit_feature(&mut self, _ast: &Ast, _node: &Node) -> VisitResult {
        self.count += 1;
        Ok(())
    }

    fn visit_unary(&mut self, ast: &Ast, node: &Node) -> VisitResult {
        self.count += 1;
        ctc_ast::visit::walk_children(self, ast, node)
    }

    fn visit_binary(&mut self, ast: &Ast, node: &Node) -> VisitResult {
        self.count += 1;
        ctc_ast::visit::walk_children(self, ast, node)
    }
}

// "A or B or C": or(A, or(B, C))
fn chain() -> Vec<Node> {
    vec![
        Node::binary(NodeId(1), "or", None, 1),
        Node::feature(NodeId(0), "A", Some(NodeId(1)), 2),
        Node::binary(NodeId(3), "or", Some(NodeId(1)), 2),
        Node::feature(NodeId(2), "B", Some(NodeId(3)), 3),
        Node::feature(NodeId(4), "C", Some(NodeId(3)), 3),
    ]
}

#[test]
fn test_hand_built_tree() {
    let ast = Ast::from_nodes("A or B or C", chain()).unwrap();
    assert_eq!(ast.len(), 5);
    assert_eq!(ast.root().id(), NodeId(1));
    assert_eq!(ast.height(), 3);
    assert_eq!(ast.count(NodeKind::BinaryOperator), 2);
    assert_eq!(AstPrinter::new().print(&ast), "(A or (B or C))");

    let mut counter = NodeCounter { count: 0 };
    walk(&mut counter, &ast).unwrap();
    assert_eq!(counter.count, 5);
}

#[test]
fn test_children_follow_insertion_order() {
    let ast = Ast::from_nodes("A or B or C", chain()).unwrap();
    let inner = ast.node(NodeId(3)).unwrap();
    let symbols: Vec<&str> = ast.children(inner).into_iter().map(Node::symbol).collect();
    assert_eq!(symbols, ["B", "C"]);
    assert_eq!(ast.first_child(inner).unwrap().symbol(), "B");
    assert_eq!(ast.second_child(inner).unwrap().symbol(), "C");
    assert!(ast.first_child(ast.node(NodeId(0)).unwrap()).is_none());
}

#[test]
fn test_structural_errors() {
    assert_eq!(Ast::from_nodes("", Vec::new()).unwrap_err(), AstError::Empty);

    let mut nodes = chain();
    nodes[4].id = NodeId(7);
    assert_eq!(
        Ast::from_nodes("A or B or C", nodes).unwrap_err(),
        AstError::OutOfRange(NodeId(7), 5)
    );

    let mut nodes = chain();
    nodes[3].parent = Some(NodeId(0));
    assert_eq!(
        Ast::from_nodes("A or B or C", nodes).unwrap_err(),
        AstError::FeatureParent {
            node: NodeId(2),
            parent: NodeId(0)
        }
    );

    let mut nodes = chain();
    nodes[2].parent = None;
    nodes[2].depth = 1;
    assert_eq!(
        Ast::from_nodes("A or B or C", nodes).unwrap_err(),
        AstError::MultipleRoots(NodeId(1), NodeId(3))
    );

    let mut nodes = chain();
    nodes[4].depth = 2;
    assert_eq!(
        Ast::from_nodes("A or B or C", nodes).unwrap_err(),
        AstError::Depth {
            node: NodeId(4),
            expected: 3,
            found: 2
        }
    );
}

#[test]
fn test_unary_with_two_children_is_rejected() {
    let nodes = vec![
        Node::unary(NodeId(1), "not", None, 1),
        Node::feature(NodeId(0), "A", Some(NodeId(1)), 2),
        Node::feature(NodeId(2), "B", Some(NodeId(1)), 2),
    ];
    let err = Ast::from_nodes("A not B", nodes).unwrap_err();
    assert_eq!(
        err.to_string(),
        "unary operator node 1 has 2 children, expected 1"
    );
}
