/*!
`gedtree` is a Rust crate for parsing GEDCOM formatted text.

The library works with GEDCOM 5.5 (Genealogical Data Communication), a
line-oriented text format widely supported by genealogy software for
storing and exchanging family history data. `gedtree` rebuilds the
hierarchical record tree from the flat stream, answers genealogical
queries over it (names, life events, ancestry, marriages, criteria
matching), and serializes the tree back to a byte-accurate GEDCOM stream.

Basic example:

```rust
use gedtree::Parser;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let source = "\
        0 @I1@ INDI\n\
        1 NAME Ada /Byron/\n\
        1 BIRT\n\
        2 DATE 10 DEC 1815\n";

    let mut parser = Parser::new();
    parser.parse(source.split_inclusive('\n'), true)?;

    let ada = parser.get_element_by_pointer("@I1@")?;
    let individual = parser.individual(ada)?;
    assert_eq!(individual.get_name(), ("Ada".to_string(), "Byron".to_string()));
    assert_eq!(individual.get_birth_year(), 1815);
    Ok(())
}
```

Parsing is strict by default in the sense that the caller chooses: with
`strict = false` the parser recovers from the malformations common in
real-world files (a missing final line terminator, text fields written
with embedded line breaks) by folding them into CONC/CONT continuations.

## Error handling example

```rust
use gedtree::{GedcomError, Parser};

let malformed = "\
    0 @I1@ INDI\n\
    not a gedcom line\n";

let mut parser = Parser::new();
match parser.parse(malformed.split_inclusive('\n'), true) {
    Ok(()) => println!("Parsing successful!"),
    Err(GedcomError::FormatViolation { line, text }) => {
        eprintln!("Format violation at line {line}: {text:?}");
    }
    Err(other) => eprintln!("Error parsing GEDCOM: {other}"),
}
```

This crate contains an optional `"json"` feature that implements
serialization and deserialization of the element tree to JSON with
[`serde`](https://serde.rs).

```rust
# #[cfg(feature = "json")]
# fn main() -> Result<(), Box<dyn std::error::Error>> {
use gedtree::Parser;

let mut parser = Parser::new();
parser.parse("0 @I1@ INDI\n".split_inclusive('\n'), true)?;

let json_output = serde_json::to_string_pretty(parser.tree())?;
println!("{}", json_output);
# Ok(())
# }
# #[cfg(not(feature = "json"))]
# fn main() {}
```
*/

#![deny(clippy::pedantic)]
#![warn(missing_docs)]

pub mod element;
pub mod error;
pub mod parser;
pub mod scanner;
pub mod tags;
pub mod tree;

pub use error::GedcomError;
pub use parser::{FamilyLink, FamilyMember, ParseFileError, Parser, Relation};
pub use tree::{ElementId, GedcomTree};
