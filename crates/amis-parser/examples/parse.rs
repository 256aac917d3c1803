//! Parse a few dictionary lines and dump the resulting entries.
//!
//! Run with a line of your own, or without arguments for built-in
//! samples: `cargo run -p amis-parser --example parse -- "<line>"`.

use amis_parser::LineParser;

const SAMPLES: &[&str] = &[
    "kolong {S}{Tw}：水牛",
    "'aca - pa'aca：賣，售 - Pa'acaay kako to titi：我賣豬肉",
    "'a'ad ＝ 'ad'ad ＝ wadwad：陳列 (為使乾) ＝ 翻亂 (如 小孩子亂翻)",
    "codad = tilid：文字；字體；筆跡；(解釋內容)補充 {Ch}",
];

fn main() {
    let parser = LineParser::new();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let lines: Vec<&str> = if args.is_empty() {
        SAMPLES.to_vec()
    } else {
        args.iter().map(String::as_str).collect()
    };

    for line in lines {
        println!("line: {line}");
        match parser.parse_line(line) {
            Ok(entries) => {
                for entry in entries {
                    println!("  {entry:?}");
                }
            }
            Err(err) => println!("  error: {err}"),
        }
        println!();
    }
}
