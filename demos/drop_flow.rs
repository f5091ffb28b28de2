// Drop-flow demo: validate a few drops, apply them, and print the resulting rows.
// Run with RUST_LOG=treelist_dnd=debug to see rejected drops and splice indices.
use tracing_subscriber::EnvFilter;

use treelist_dnd::{
    DropContext, NoFilter, Node, TreeAction, TreeError, TreeEvent, ViewOptions, tree_rows,
};

// File-browser payload carried by each node.
#[derive(Clone, Debug)]
struct FileInfo {
    kind: &'static str,
    size: &'static str,
}

fn sample() -> Vec<Node<u32, FileInfo>> {
    let file = |kind, size| FileInfo { kind, size };
    vec![
        Node::container(1, 0, "Folder 1"),
        Node::new(2, 1, "File 1-1").with_data(file("csv", "0.5MB")),
        Node::new(3, 1, "File 1-2").with_data(file("text", "4.8MB")),
        Node::container(4, 0, "Folder 2"),
        Node::container(5, 4, "Folder 2-1"),
        Node::new(6, 5, "File 2-1-1").with_data(file("image", "2.1MB")),
        Node::new(7, 0, "File 3").with_data(file("image", "0.8MB")),
    ]
}

fn print_tree(tree: &[Node<u32, FileInfo>]) {
    for row in tree_rows(tree, &0, ViewOptions::flat(), &NoFilter) {
        let Some(node) = tree.iter().find(|node| node.id == row.id) else {
            continue;
        };
        let indent = "  ".repeat(usize::from(row.level));
        match &node.data {
            Some(info) => println!("{indent}{} ({}, {})", node.text, info.kind, info.size),
            None => println!("{indent}{}/", node.text),
        }
    }
}

fn main() -> Result<(), TreeError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut tree = sample();
    print_tree(&tree);

    let actions = [
        // Into a folder, after its only child.
        TreeAction::Drop {
            drag: 7,
            target: 5,
            index: 1,
        },
        // Folder into its own subfolder: refused.
        TreeAction::Drop {
            drag: 4,
            target: 5,
            index: 0,
        },
        // Onto a file: refused.
        TreeAction::Drop {
            drag: 3,
            target: 2,
            index: 0,
        },
        TreeAction::ReorderUp(3),
        TreeAction::Reparent { drag: 1, target: 4 },
    ];

    for action in actions {
        println!("\n{action:?}");
        let event = DropContext::new(&tree, 0).handle_action(action)?;
        match event {
            TreeEvent::Moved {
                tree: next,
                source_index,
                destination_index,
            } => {
                println!("moved {source_index} -> {destination_index}");
                tree = next;
                print_tree(&tree);
            }
            TreeEvent::Rejected(reason) => println!("rejected: {reason}"),
            TreeEvent::Unhandled => println!("nothing to do"),
        }
    }

    Ok(())
}
