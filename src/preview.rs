use crate::vfs::VirtualFS;
use colored::Colorize;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Represents a node in the tree (either file or directory).
#[derive(Debug)]
struct TreeNode {
    name: String,
    children: Vec<Rc<RefCell<TreeNode>>>,
    is_file: bool,
}
impl TreeNode {
    fn new(name: String, is_file: bool) -> Self {
        Self {
            name,
            children: Vec::new(),
            is_file,
        }
    }
}

/// One printable row of the tree.
#[derive(Debug, PartialEq)]
struct TreeLine {
    prefix: String,
    connector: &'static str,
    name: String,
    is_file: bool,
}

/// Build the directory tree from the planned entries, rooted at `destination`.
fn build_tree(vfs: &VirtualFS, destination: &Path) -> Rc<RefCell<TreeNode>> {
    let root_name = destination
        .file_name()
        .map(|os| os.to_string_lossy().to_string())
        .unwrap_or_else(|| destination.display().to_string());

    let root = Rc::new(RefCell::new(TreeNode::new(root_name, false)));

    // relative path -> node; the root is the empty path
    let mut lookup: HashMap<PathBuf, Rc<RefCell<TreeNode>>> = HashMap::new();
    lookup.insert(PathBuf::new(), Rc::clone(&root));

    for entry in &vfs.entries {
        let rel_path = entry.destination();
        let parent_path = rel_path.parent().unwrap_or_else(|| Path::new(""));

        let Some(parent_node) = lookup.get(parent_path).map(Rc::clone) else {
            log::debug!("parent not planned for path: {}", rel_path.display());
            continue;
        };

        let child_name = rel_path
            .file_name()
            .map(|os| os.to_string_lossy().to_string())
            .unwrap_or_else(|| rel_path.display().to_string());

        let new_child = Rc::new(RefCell::new(TreeNode::new(child_name, entry.is_file())));

        parent_node
            .borrow_mut()
            .children
            .push(Rc::clone(&new_child));

        if !entry.is_file() {
            lookup.insert(rel_path.to_path_buf(), new_child);
        }
    }

    root
}

fn collect_lines(node: &Rc<RefCell<TreeNode>>, prefix: &str, is_last: bool, out: &mut Vec<TreeLine>) {
    let node_borrow = node.borrow();

    out.push(TreeLine {
        prefix: prefix.to_string(),
        connector: if is_last { "└── " } else { "├── " },
        name: node_borrow.name.clone(),
        is_file: node_borrow.is_file,
    });

    let child_prefix = if is_last {
        format!("{}    ", prefix)
    } else {
        format!("{}│   ", prefix)
    };

    let len = node_borrow.children.len();
    for (i, child) in node_borrow.children.iter().enumerate() {
        collect_lines(child, &child_prefix, i == len - 1, out);
    }
}

fn tree_lines(vfs: &VirtualFS, destination: &Path) -> Vec<TreeLine> {
    let mut lines = Vec::new();

    collect_lines(&build_tree(vfs, destination), "", true, &mut lines);

    lines
}

/// Prints the planned project as an ASCII tree.
pub fn preview_as_tree(vfs: &VirtualFS, destination: &Path) {
    println!(
        "Legend: {} = (directory), {} = (file)",
        "blue".blue(),
        "green".green()
    );

    println!(
        "{} {}\n",
        "┌─".bold().bright_blue(),
        "Preview".bold().bright_blue(),
    );

    for line in tree_lines(vfs, destination) {
        let name = if line.is_file {
            line.name.green()
        } else {
            line.name.blue()
        };
        println!("{}{}{}", line.prefix.yellow(), line.connector.yellow(), name);
    }

    println!(
        "\n{} {}\n",
        "└─".bold().bright_blue(),
        "Dry run: nothing was written".bright_green()
    );
}
