use menu_pdf_to_csv::{
    AllergyVocabulary, ExtractedTable, MENU_CSV_HEADER, MenuConversion, normalize_tables,
};

fn table(page: u32, table_index: usize, raw: &[&[&str]]) -> ExtractedTable {
    ExtractedTable {
        page,
        table_index,
        rows: raw
            .iter()
            .map(|row| row.iter().map(|cell| (*cell).to_string()).collect())
            .collect(),
    }
}

#[test]
fn header_line_always_opens_non_empty_output() {
    let vocab = AllergyVocabulary::standard();
    let tables = [table(1, 0, &[&["おにぎり", "鮭おにぎり", "200円"]])];

    let csv = normalize_tables(&tables, &vocab);
    assert_eq!(csv.lines().next(), Some(MENU_CSV_HEADER));
}

#[test]
fn three_tables_produce_two_separators_with_reemitted_headers() {
    let vocab = AllergyVocabulary::standard();
    let tables = [
        table(1, 0, &[&["カレー", "", "700円"]]),
        table(1, 1, &[&["うどん", "", "600円"]]),
        table(2, 0, &[&["おでん", "", "450円"]]),
    ];

    let csv = normalize_tables(&tables, &vocab);
    let lines = csv.lines().collect::<Vec<_>>();

    let separators = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| line.contains("新しいテーブル"))
        .map(|(index, _)| index)
        .collect::<Vec<_>>();
    assert_eq!(separators.len(), 2);
    for index in &separators {
        assert_eq!(lines[index - 1], "");
        assert_eq!(lines[index + 1], MENU_CSV_HEADER);
    }
    assert!(lines[separators[0]].contains("セクション 2"));
    assert!(lines[separators[1]].contains("セクション 3"));
}

#[test]
fn zero_row_tables_do_not_advance_section_numbering() {
    let vocab = AllergyVocabulary::standard();
    let tables = [
        table(1, 0, &[&["カレー", "", "700円"]]),
        table(2, 0, &[]),
        table(3, 0, &[&["うどん", "", "600円"]]),
    ];

    let csv = normalize_tables(&tables, &vocab);
    assert!(csv.contains("セクション 2"));
    assert!(!csv.contains("セクション 3"));
}

#[test]
fn nameless_rows_never_emit_records() {
    let vocab = AllergyVocabulary::standard();
    let tables = [table(
        1,
        0,
        &[
            &["", "名前なし", "300円"],
            &["   ", "空白のみ", "300円"],
            &["たこ焼き", "8個入り", "480円"],
        ],
    )];

    let csv = normalize_tables(&tables, &vocab);
    let lines = csv.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1], "たこ焼き,8個入り,480円,,,,,true");
}

#[test]
fn contains_mark_wins_even_when_both_symbols_share_a_cell() {
    let vocab = AllergyVocabulary::standard();
    let tables = [table(
        1,
        0,
        &[
            &["品名", "説明", "価格", "落花生"],
            &["担々麺", "胡麻だれ", "850円", "●○▲"],
        ],
    )];

    let csv = normalize_tables(&tables, &vocab);
    assert!(
        csv.contains("担々麺,胡麻だれ,850円,,\"落花生\",,,true"),
        "unexpected CSV: {csv:?}"
    );
}

#[test]
fn duplicate_resolutions_collapse_to_one_entry_per_set() {
    let vocab = AllergyVocabulary::standard();
    let tables = [table(
        1,
        0,
        &[
            &["品名", "乳", "乳", "バナナ", "バナナ"],
            &["シェイク", "●", "●", "○", "○"],
        ],
    )];

    let csv = normalize_tables(&tables, &vocab);
    assert!(
        csv.contains("シェイク,●,,,\"乳\",\"バナナ\",,true"),
        "unexpected CSV: {csv:?}"
    );
}

#[test]
fn ragged_rows_are_tolerated() {
    let vocab = AllergyVocabulary::standard();
    let tables = [table(
        1,
        0,
        &[
            &["品名"],
            &["焼きおにぎり", "醤油", "250円", "余分", "列", "まで"],
            &["みそ汁"],
        ],
    )];

    let csv = normalize_tables(&tables, &vocab);
    assert!(csv.contains("焼きおにぎり,醤油,250円,,,,,true"));
    assert!(csv.contains("みそ汁,,,,,,,true"));
}

#[test]
fn normalizing_twice_is_byte_identical() {
    let vocab = AllergyVocabulary::standard();
    let tables = [
        table(
            1,
            0,
            &[
                &["品名", "説明", "価格", "小麦", "卵"],
                &["唐揚げ", "鶏の唐揚げ", "500円", "●", "○"],
            ],
        ),
        table(2, 0, &[&["うどん", "", "600円"]]),
    ];

    assert_eq!(
        normalize_tables(&tables, &vocab),
        normalize_tables(&tables, &vocab)
    );
}

#[test]
fn fields_with_commas_and_quotes_survive_a_csv_parser() {
    let vocab = AllergyVocabulary::standard();
    let tables = [table(
        1,
        0,
        &[&["盛り合わせ, 大", "「人気」の一皿, \"当店名物\"", "1,200円"]],
    )];

    let csv = normalize_tables(&tables, &vocab);
    let data_line = csv.lines().nth(1).expect("one data line");

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(data_line.as_bytes());
    let record = reader
        .records()
        .next()
        .expect("one record should parse")
        .expect("record should be valid CSV");

    assert_eq!(&record[0], "盛り合わせ, 大");
    assert_eq!(&record[1], "「人気」の一皿, \"当店名物\"");
    assert_eq!(&record[2], "1,200円");
    assert_eq!(&record[7], "true");
}

#[test]
fn envelope_serializes_with_raw_japanese_text() {
    let conversion = MenuConversion {
        csv: format!("{MENU_CSV_HEADER}\n唐揚げ,,500円,,,,,true"),
        tables_found: 1,
        pages_processed: vec![1],
    };

    let json = serde_json::to_string(&conversion).expect("envelope should serialize");
    assert!(json.contains("唐揚げ"), "non-ASCII must stay raw: {json}");
    assert!(json.contains("\"tables_found\":1"));
    assert!(json.contains("\"pages_processed\":[1]"));
    assert!(!json.contains("\\u"), "no escaped sequences expected: {json}");
}
