use bencher::{benchmark_group, benchmark_main, black_box, Bencher};

use glyphcols::{FontTable, Glyph};

benchmark_main!(benches);
benchmark_group!(benches, transpose, convert);

const FONT: &str = include_str!("../tests/data/picolambda.json");

fn transpose(b: &mut Bencher) {
    let glyph = Glyph::new([0x1234, 0xfff0, 0x0ff0, 3, 0xaaaa, 0x5555, 0x8004, 0xffff]);
    b.iter(|| black_box(black_box(&glyph).trimmed()));
}

fn convert(b: &mut Bencher) {
    b.iter(|| black_box(FontTable::from_json(black_box(FONT)).unwrap()));
}
