use engine::{Category, CategoryCatalog, Direction, Extractor, ExtractorRules, KeywordRule};

fn extractor() -> Extractor {
    Extractor::builder().build().unwrap()
}

#[test]
fn grocery_expense() {
    let parsed = extractor().extract("gastei 50 no mercado", &CategoryCatalog::default_seed());

    assert_eq!(parsed.amount.to_string(), "50.00");
    assert_eq!(parsed.direction, Direction::Expense);
    assert_eq!(parsed.description, "Mercado");
    assert_eq!(parsed.category_name.as_deref(), Some("Alimentação"));
}

#[test]
fn salary_income() {
    let parsed = extractor().extract("recebi 1500 de salário", &CategoryCatalog::default_seed());

    assert_eq!(parsed.amount.to_string(), "1500.00");
    assert_eq!(parsed.direction, Direction::Income);
    assert_eq!(parsed.description, "Salário");
    assert_eq!(parsed.category_name.as_deref(), Some("Salário"));
}

#[test]
fn bare_number_uses_placeholder_and_fallback_category() {
    let parsed = extractor().extract("50", &CategoryCatalog::default_seed());

    assert_eq!(parsed.amount.to_string(), "50.00");
    assert_eq!(parsed.direction, Direction::Expense);
    assert_eq!(parsed.description, "Nova Transação");
    assert_eq!(parsed.category_name.as_deref(), Some("Outros"));
}

#[test]
fn bare_number_without_other_category_falls_back_to_shopping() {
    let catalog = CategoryCatalog::new(vec![
        Category::expense("Compras"),
        Category::income("Salário"),
    ])
    .unwrap();
    let parsed = extractor().extract("50", &catalog);
    assert_eq!(parsed.category_name.as_deref(), Some("Compras"));
}

#[test]
fn no_digits_means_zero_amount() {
    let ex = extractor();
    let catalog = CategoryCatalog::default_seed();
    for text in ["", "almoço", "pix recebido", "R$", "um real e cinquenta", "çãõ ü"] {
        assert!(ex.extract(text, &catalog).amount.is_zero(), "{text}");
    }
}

#[test]
fn income_markers_flip_direction() {
    let ex = extractor();
    let catalog = CategoryCatalog::default_seed();
    for text in [
        "ganhei 20 na rifa",
        "depósito de 300",
        "pix recebido 45",
        "RECEBI 10",
    ] {
        assert_eq!(ex.extract(text, &catalog).direction, Direction::Income, "{text}");
    }
    for text in ["paguei 20 luz", "uber 15", ""] {
        assert_eq!(ex.extract(text, &catalog).direction, Direction::Expense, "{text}");
    }
}

#[test]
fn first_keyword_in_table_wins_over_text_position() {
    // "uber" appears first in the text, but "mercado" is earlier in the table.
    let parsed = extractor().extract("uber até o mercado 18", &CategoryCatalog::default_seed());
    assert_eq!(parsed.category_name.as_deref(), Some("Alimentação"));
}

#[test]
fn substitute_tables_drive_extraction() {
    let rules = ExtractorRules {
        keywords: vec![
            KeywordRule::new("rent", "Housing"),
            KeywordRule::new("food", "Food"),
        ],
        income_markers: vec!["received".to_string(), "salary".to_string()],
        stop_words: vec!["spent".to_string(), "on".to_string(), "for".to_string()],
        placeholder: "New Transaction".to_string(),
        fallback_category: "Other".to_string(),
        expense_fallback_category: "Shopping".to_string(),
    };
    let ex = Extractor::builder().rules(rules).build().unwrap();
    let catalog = CategoryCatalog::new(vec![
        Category::expense("Food"),
        Category::expense("Housing"),
        Category::expense("Shopping"),
        Category::income("Salary"),
    ])
    .unwrap();

    let parsed = ex.extract("spent 12.5 on food for rent", &catalog);
    assert_eq!(parsed.category_name.as_deref(), Some("Housing"));
    assert_eq!(parsed.description, "Food Rent");

    let parsed = ex.extract("50", &catalog);
    assert_eq!(parsed.description, "New Transaction");
    assert_eq!(parsed.category_name.as_deref(), Some("Shopping"));

    let parsed = ex.extract("received 900", &catalog);
    assert_eq!(parsed.direction, Direction::Income);
    assert_eq!(parsed.category_name, None);
}

#[test]
fn extraction_is_idempotent() {
    let ex = extractor();
    let catalog = CategoryCatalog::default_seed();
    for text in ["gastei 50 no mercado", "", "R$ 1.234,56 aluguel", "🙂 99"] {
        assert_eq!(ex.extract(text, &catalog), ex.extract(text, &catalog));
    }
}

#[test]
fn extractor_is_shareable_across_threads() {
    let ex = std::sync::Arc::new(extractor());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let ex = ex.clone();
            std::thread::spawn(move || {
                let catalog = CategoryCatalog::default_seed();
                ex.extract(&format!("lanche {i}"), &catalog)
            })
        })
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        let parsed = handle.join().unwrap();
        assert_eq!(parsed.amount.minor(), Some(i as i64 * 100));
        assert_eq!(parsed.category_name.as_deref(), Some("Alimentação"));
    }
}
