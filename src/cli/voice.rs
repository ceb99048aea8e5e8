use crate::error::Result;
use crate::fmt::money;
use crate::voice::{parse_voice_input, voice_input_examples};

pub fn run(text: &[String], json: bool, examples: bool) -> Result<()> {
    if examples {
        println!("Try saying:");
        for example in voice_input_examples() {
            println!("  \"{example}\"");
        }
        return Ok(());
    }

    let draft = parse_voice_input(&text.join(" "));
    if json {
        println!("{}", serde_json::to_string_pretty(&draft)?);
        return Ok(());
    }

    println!("Type:    {}", draft.txn_type().label());
    match draft.amount {
        Some(amount) => println!("Amount:  {}", money(amount as f64)),
        None => println!("Amount:  (not recognized)"),
    }
    println!("Note:    {}", if draft.note.is_empty() { "(none)" } else { &draft.note });
    Ok(())
}
