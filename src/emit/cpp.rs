//! C++ emitters for the four anchor kinds

use crate::schema::{ParameterDefinition, ParameterSchema, ValueType};

use super::block::{cpp_string_escape, BlockBuilder};
use super::EmitOptions;

/// `extern <type> <symbol>;` per parameter
pub fn declare(schema: &ParameterSchema, indent: &str, options: &EmitOptions) -> String {
    let mut block = BlockBuilder::new(indent, &options.banner);
    for def in schema {
        let mut line = format!("extern {} {};", def.value_type.cpp_type(), def.symbol_name);
        if options.doc_comments {
            if let Some(comment) = doc_comment(def) {
                line.push_str(" // ");
                line.push_str(&comment);
            }
        }
        block.line(line);
    }
    block.finish()
}

/// `<type> <qualifier>::<symbol> = <default>;` per parameter
pub fn define(schema: &ParameterSchema, indent: &str, options: &EmitOptions) -> String {
    let mut block = BlockBuilder::new(indent, &options.banner);
    for def in schema {
        block.line(format!(
            "{} {} = {};",
            def.value_type.cpp_type(),
            options.qualified(&def.symbol_name),
            def.default_literal
        ));
    }
    block.finish()
}

/// One `if (tag == "<key>")` dispatch block per parameter
///
/// The generated code expects `tag` and `split` in scope, with `split[1]`
/// holding the raw value. A value that fails to stream leaves the stream in a
/// failed state; nothing here checks for it.
pub fn parse(schema: &ParameterSchema, indent: &str, options: &EmitOptions) -> String {
    let mut block = BlockBuilder::new(indent, &options.banner);
    for def in schema {
        let target = options.qualified(&def.symbol_name);
        let stream = match def.value_type {
            ValueType::Boolean => format!("ss >> std::boolalpha >> {target};"),
            _ => format!("ss >> {target};"),
        };

        block.line(format!("// Parse {}", def.key));
        block.line(format!("if (tag == \"{}\")", cpp_string_escape(&def.key)));
        block.line("{");
        block.line("    std::stringstream ss(split[1]);");
        block.line(format!("    {stream}"));
        block.line("}");
        block.blank();
    }
    block.finish()
}

/// One line per parameter writing its key and live value to the sink
pub fn output(schema: &ParameterSchema, indent: &str, options: &EmitOptions) -> String {
    let mut block = BlockBuilder::new(indent, &options.banner);
    for def in schema {
        let label = cpp_string_escape(&format!("{}{}", def.key, options.output_separator));
        let boolalpha = match def.value_type {
            ValueType::Boolean => "std::boolalpha << ",
            _ => "",
        };
        block.line(format!(
            "{} << \"    \" << \"{}\" << {}{} << \"\\n\";",
            options.sink,
            label,
            boolalpha,
            options.qualified(&def.symbol_name)
        ));
    }
    block.finish()
}

/// Description collapsed onto one line, if there is one
fn doc_comment(def: &ParameterDefinition) -> Option<String> {
    let text = def.description.split_whitespace().collect::<Vec<_>>().join(" ");
    (!text.is_empty()).then_some(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn schema() -> ParameterSchema {
        ParameterSchema::from_definitions([
            ParameterDefinition::new(
                "walkers",
                ValueType::Integer,
                "target_population",
                "1000",
                "The target population\n of walkers.",
            ),
            ParameterDefinition::new(
                "exchange_moves",
                ValueType::Boolean,
                "exchange_moves",
                "true",
                "",
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_declare_block() {
        let block = declare(&schema(), "    ", &EmitOptions::default());
        assert_eq!(
            block,
            "    // Generated by paramgen\n\
             \x20   extern int target_population;\n\
             \x20   extern bool exchange_moves;\n\
             \x20   // End generated by paramgen"
        );
    }

    #[test]
    fn test_declare_with_doc_comments() {
        let options = EmitOptions::default().with_doc_comments(true);
        let block = declare(&schema(), "", &options);
        let lines: Vec<&str> = block.lines().collect();
        assert_eq!(
            lines[1],
            "extern int target_population; // The target population of walkers."
        );
        // No description, no comment
        assert_eq!(lines[2], "extern bool exchange_moves;");
    }

    #[test]
    fn test_define_block() {
        let block = define(&schema(), "", &EmitOptions::default());
        insta::assert_snapshot!(block, @r###"
        // Generated by paramgen
        int params::target_population = 1000;
        bool params::exchange_moves = true;
        // End generated by paramgen
        "###);
    }

    #[test]
    fn test_define_custom_qualifier() {
        let options = EmitOptions::default().with_qualifier("config");
        let block = define(&schema(), "", &options);
        assert!(block.contains("int config::target_population = 1000;"));
    }

    #[test]
    fn test_parse_block() {
        let block = parse(&schema(), "  ", &EmitOptions::default());
        let expected = [
            "  // Generated by paramgen",
            "  // Parse walkers",
            "  if (tag == \"walkers\")",
            "  {",
            "      std::stringstream ss(split[1]);",
            "      ss >> params::target_population;",
            "  }",
            "",
            "  // Parse exchange_moves",
            "  if (tag == \"exchange_moves\")",
            "  {",
            "      std::stringstream ss(split[1]);",
            "      ss >> std::boolalpha >> params::exchange_moves;",
            "  }",
            "",
            "  // End generated by paramgen",
        ]
        .join("\n");
        assert_eq!(block, expected);
    }

    #[test]
    fn test_output_block_default_separator() {
        let block = output(&schema(), "", &EmitOptions::default());
        let lines: Vec<&str> = block.lines().collect();
        assert_eq!(
            lines[1],
            r#"progress_file << "    " << "walkers " << params::target_population << "\n";"#
        );
        assert_eq!(
            lines[2],
            r#"progress_file << "    " << "exchange_moves " << std::boolalpha << params::exchange_moves << "\n";"#
        );
    }

    #[test]
    fn test_output_block_legacy_separator() {
        let options = EmitOptions::default()
            .with_output_separator("")
            .with_sink("params::progress_file");
        let block = output(&schema(), "", &options);
        assert!(block.contains(
            r#"params::progress_file << "    " << "walkers" << params::target_population << "\n";"#
        ));
    }

    #[test]
    fn test_output_block_control_character_separator() {
        let options = EmitOptions::default().with_output_separator("\t");
        let block = output(&schema(), "", &options);
        assert_eq!(block.lines().count(), 4);
        assert!(block.contains(r#"<< "walkers\t" << params::target_population"#));

        let options = EmitOptions::default().with_output_separator(":\n");
        let block = output(&schema(), "", &options);
        assert_eq!(block.lines().count(), 4);
        assert!(block.contains(r#"<< "walkers:\n" << params::target_population"#));
    }

    #[test]
    fn test_empty_schema_emits_only_sentinels() {
        let block = parse(&ParameterSchema::new(), "", &EmitOptions::default());
        assert_eq!(
            block,
            "// Generated by paramgen\n// End generated by paramgen"
        );
    }
}
