use std::rc::Rc;

use blockedit::config::EditorConfig;
use blockedit::document::{Block, Document, DocumentPosition, ListType};
use blockedit::editor::Editor;
use blockedit::list_toggle::ListToggle;
use blockedit::schema::NestingSchema;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "blockedit")]
#[command(about = "Structured block editor core demo", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the demo document
    Show,
    /// Toggle a block range to/from a list type
    Toggle {
        /// First block index of the selection
        from: usize,
        /// Last block index of the selection
        to: usize,
        /// List type (defaults to the configured one)
        #[arg(long, value_enum)]
        list_type: Option<ListTypeArg>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ListTypeArg {
    Bulleted,
    Numbered,
}

impl From<ListTypeArg> for ListType {
    fn from(arg: ListTypeArg) -> Self {
        match arg {
            ListTypeArg::Bulleted => ListType::Bulleted,
            ListTypeArg::Numbered => ListType::Numbered,
        }
    }
}

fn demo_document() -> Document {
    let mut doc = Document::new();
    doc.add_block(Block::plain(0).with_text("Groceries"));
    doc.add_block(Block::list_item(0, ListType::Bulleted, 0).with_text("Fruit"));
    doc.add_block(Block::list_item(0, ListType::Bulleted, 1).with_text("Apples"));
    doc.add_block(Block::list_item(0, ListType::Bulleted, 1).with_text("Pears"));
    doc.add_block(Block::list_item(0, ListType::Numbered, 1).with_text("Bananas"));
    doc.add_block(Block::list_item(0, ListType::Bulleted, 2).with_text("Very ripe"));
    doc.add_block(Block::plain(0).with_text("Remember the bags."));
    doc
}

fn toggle(from: usize, to: usize, target: ListType, max_indent: u32) {
    let mut editor = Editor::with_document(demo_document());
    let toggle = ListToggle::attach(&mut editor, target, Rc::new(NestingSchema::new(max_indent)));

    println!("Before:");
    print!("{}", editor.document());

    editor.set_selection(
        DocumentPosition::new(from, 0),
        DocumentPosition::new(to, 0),
    );
    println!(
        "\nToggle {} on blocks {from}..={to} (active: {}, enabled: {})",
        target,
        toggle.active(),
        toggle.enabled()
    );

    if let Err(err) = toggle.execute(&mut editor, None, None) {
        eprintln!("Toggle failed: {err}");
        std::process::exit(1);
    }

    println!("\nAfter:");
    print!("{}", editor.document());
}

fn main() {
    let args = Args::parse();
    let config = EditorConfig::load();

    match args.command {
        Some(Commands::Show) | None => {
            print!("{}", demo_document());
        }
        Some(Commands::Toggle {
            from,
            to,
            list_type,
        }) => {
            let target = list_type
                .map(ListType::from)
                .unwrap_or(config.default_list_type);
            toggle(from, to, target, config.max_indent);
        }
    }
}
