#![no_main]

use chunkstr::{BuilderConfig, StrBuilder};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    let initial = usize::from(data[0] % 32);
    let cap = usize::from(data[1] % 64) + 1;
    let Ok(config) = BuilderConfig::new(initial, cap) else {
        return;
    };

    let mut sb = StrBuilder::unpooled(config);
    let mut model = String::new();

    // Each op is one byte of opcode followed by a short argument.
    let mut rest = &data[2..];
    while let Some((&op, tail)) = rest.split_first() {
        let take = usize::from(op >> 3).min(tail.len());
        let (arg, tail) = tail.split_at(take);
        rest = tail;
        let text = String::from_utf8_lossy(arg);

        match op % 6 {
            0 | 1 => {
                sb.append(&*text);
                model.push_str(&text);
            }
            2 => {
                let value = arg.iter().fold(0i64, |acc, &b| acc.wrapping_mul(251).wrapping_add(b as i64));
                sb.append(value);
                model.push_str(&value.to_string());
            }
            3 => {
                let c = char::from(op);
                sb.append(c);
                model.push(c);
            }
            4 => {
                // Split the argument into pattern and replacement.
                let mid = text.char_indices().nth(text.chars().count() / 2).map_or(text.len(), |(i, _)| i);
                let (old, new) = text.split_at(mid);
                sb.replace(old, new);
                if !old.is_empty() {
                    model = model.replace(old, new);
                }
            }
            _ => {
                sb.clear();
                model.clear();
            }
        }

        assert_eq!(sb.len(), model.len());
        let mut expected_offset = 0;
        for chunk in sb.chunks() {
            assert_eq!(chunk.offset(), expected_offset);
            expected_offset += chunk.len();
        }
    }

    assert_eq!(sb.to_text(), model);
    assert_eq!(sb, StrBuilder::from(model.as_str()));
    assert_eq!(sb.hash_code(), StrBuilder::from(model.as_str()).hash_code());
});
