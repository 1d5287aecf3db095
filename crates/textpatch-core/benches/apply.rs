use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use ropey::Rope;
use textpatch_core::{Document, PatchApplier, TextChange};

fn large_text(line_count: usize) -> String {
    let mut out = String::with_capacity(line_count * 64);
    for i in 0..line_count {
        out.push_str(&format!("{i:06} function f(a,b){{return a+b;}} // textpatch line\n"));
    }
    out
}

/// One edit per line: insert a space after every comma.
fn comma_edits(text: &str) -> Vec<TextChange> {
    text.chars()
        .enumerate()
        .filter(|(_, ch)| *ch == ',')
        .map(|(offset, _)| TextChange::insert(offset + 1, " "))
        .collect()
}

fn bench_document_apply(c: &mut Criterion) {
    let text = large_text(10_000);
    let edits = comma_edits(&text);
    let applier = PatchApplier::default();

    c.bench_function("document_apply/10k_edits", |b| {
        b.iter_batched(
            || Document::new(&text),
            |mut doc| {
                let delta = applier.apply(&mut doc, black_box(&edits)).unwrap();
                black_box(delta.after_char_count);
            },
            BatchSize::LargeInput,
        )
    });
}

fn bench_rope_apply_in_place(c: &mut Criterion) {
    let text = large_text(10_000);
    let edits = comma_edits(&text);
    let applier = PatchApplier::default();

    c.bench_function("rope_apply_in_place/10k_edits", |b| {
        b.iter_batched(
            || Rope::from_str(&text),
            |mut rope| {
                applier.apply_in_place(&mut rope, black_box(&edits)).unwrap();
                black_box(rope.len_chars());
            },
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(benches, bench_document_apply, bench_rope_apply_in_place);
criterion_main!(benches);
