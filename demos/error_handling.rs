//! Demonstrate error handling for invalid Aster input.

use aster::ParseErrorKind;

fn main() {
    // Unterminated string: the scanner keeps going, the parser refuses.
    let source = "mass greeting = \"hello;\nwarp;\n";
    for e in aster::lex_errors(&aster::scan(source)) {
        println!("Lex error: {e}");
        println!("  Kind: {:?}", e.kind);
    }
    match aster::parse_str(source) {
        Ok(_) => println!("Parsed OK (unexpected)"),
        Err(e) => {
            println!("Parse error: {e}");
            println!("  Location: line {}, column {}", e.span.line, e.span.column);
        }
    }

    println!();

    // Missing close paren
    match aster::parse_str("phase (truth {\n\twarp;\n}\n") {
        Ok(_) => println!("Parsed OK (unexpected)"),
        Err(e) => {
            if let ParseErrorKind::ExpectedToken { expected, context, .. } = &e.kind {
                println!("Missing {expected} {context}");
            }
            println!("Parse error: {e}");
            println!("  Kind: {:?}", e.kind);
            println!("  Location: line {}, column {}", e.span.line, e.span.column);
        }
    }
}
