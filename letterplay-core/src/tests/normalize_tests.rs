use super::*;
use serde_json::json;

fn roundtrip(record: &GameRecord) -> GameRecord {
    let value = serde_json::to_value(record).unwrap();
    normalize(&value).unwrap()
}

#[test]
fn null_is_none() {
    assert!(normalize(&Value::Null).is_none());
}

#[test]
fn empty_object_gets_defaults() {
    let record = normalize(&json!({})).unwrap();
    assert_eq!(record, GameRecord::default());
    assert_eq!(record.name, UNKNOWN_NAME);
    assert_eq!(record.summary, UNKNOWN_SUMMARY);
    assert_eq!(record.developer, UNKNOWN_COMPANY);
    assert_eq!(record.publisher, UNKNOWN_COMPANY);
    assert_eq!(record.cover_url, "");
    assert!(record.status.is_none());
}

#[test]
fn non_object_input_gets_defaults() {
    let record = normalize(&json!(17)).unwrap();
    assert_eq!(record, GameRecord::default());
}

#[test]
fn cover_object_is_canonicalized() {
    let record = normalize(&json!({
        "cover": {"url": "//images.example.com/t_thumb/abc.jpg"}
    }))
    .unwrap();
    assert_eq!(record.cover_url, "https://images.example.com/t_cover_big/abc.jpg");
}

#[test]
fn cover_falls_back_through_catalog_fields() {
    let record = normalize(&json!({"cover": null, "cover_url": "", "capa_url": "//c.com/t_thumb/x.png"})).unwrap();
    assert_eq!(record.cover_url, "https://c.com/t_cover_big/x.png");

    let record = normalize(&json!({"url_capa": "https://c.com/y.png"})).unwrap();
    assert_eq!(record.cover_url, "https://c.com/y.png");
}

#[test]
fn cover_as_plain_string() {
    let record = normalize(&json!({"cover": "//c.com/t_thumb/z.jpg"})).unwrap();
    assert_eq!(record.cover_url, "https://c.com/t_cover_big/z.jpg");
}

#[test]
fn mixed_genre_shapes() {
    let record = normalize(&json!({"genres": [{"nome_genero": "RPG"}, "Indie"]})).unwrap();
    assert_eq!(record.genres, vec!["RPG", "Indie"]);
}

#[test]
fn genres_fall_back_to_generos_and_dedupe() {
    let record = normalize(&json!({
        "genres": [],
        "generos": [{"id_genero": 1, "nome_genero": "Shooter"}, {"name": "Shooter"}, {"name": "Puzzle"}, 3, null]
    }))
    .unwrap();
    assert_eq!(record.genres, vec!["Shooter", "Puzzle"]);
}

#[test]
fn watchlist_entry_wrapper() {
    let record = normalize(&json!({
        "jogo": {"id_jogo": 7, "titulo": "X"},
        "status_jogo": "JOGADO"
    }))
    .unwrap();
    assert_eq!(record.id, 7);
    assert_eq!(record.name, "X");
    assert_eq!(record.status, Some(PlayStatus::Played));
}

#[test]
fn infos_game_wrapper_is_unwrapped() {
    let record = normalize(&json!({"infosGame": {"id": 12, "name": "Celeste"}})).unwrap();
    assert_eq!(record.id, 12);
    assert_eq!(record.name, "Celeste");
    assert!(record.status.is_none());
}

#[test]
fn status_from_plain_status_field() {
    let record = normalize(&json!({"id": 1, "status": "DROPADO"})).unwrap();
    assert_eq!(record.status, Some(PlayStatus::Dropped));
}

#[test]
fn numeric_igdb_status_is_ignored() {
    // IGDB uses an integer `status` for release state
    let record = normalize(&json!({"id": 1, "status": 4})).unwrap();
    assert!(record.status.is_none());
}

#[test]
fn unknown_status_string_is_absent() {
    let record = normalize(&json!({"jogo": {"id": 1}, "status_jogo": "ZERADO"})).unwrap();
    assert!(record.status.is_none());
}

#[test]
fn rating_precedence_prefers_system_average() {
    let record = normalize(&json!({"media_nota_sistema": 80, "rating": 10})).unwrap();
    assert_eq!(record.rating, 80.0);
}

#[test]
fn rating_chain_order() {
    let record = normalize(&json!({"total_rating": 71.5, "media": 9, "rating": 3})).unwrap();
    assert_eq!(record.rating, 71.5);

    let record = normalize(&json!({"media": 9, "rating": 3})).unwrap();
    assert_eq!(record.rating, 9.0);

    let record = normalize(&json!({"metacritic_rating": 88})).unwrap();
    assert_eq!(record.rating, 88.0);
}

#[test]
fn zero_system_average_falls_through() {
    let record = normalize(&json!({"media_nota_sistema": 0, "total_rating": 85})).unwrap();
    assert_eq!(record.rating, 85.0);
}

#[test]
fn rating_accepts_numeric_strings_and_clamps() {
    let record = normalize(&json!({"rating": "42.5"})).unwrap();
    assert_eq!(record.rating, 42.5);

    let record = normalize(&json!({"rating": 250})).unwrap();
    assert_eq!(record.rating, 100.0);

    let record = normalize(&json!({"rating": "n/a"})).unwrap();
    assert_eq!(record.rating, 0.0);
}

#[test]
fn id_falls_back_to_catalog_id() {
    let record = normalize(&json!({"id": null, "id_jogo": "33"})).unwrap();
    assert_eq!(record.id, 33);
}

#[test]
fn out_of_range_float_id_falls_through() {
    let record = normalize(&json!({"id": 1e30, "id_jogo": 5})).unwrap();
    assert_eq!(record.id, 5);

    let record = normalize(&json!({"id": -1e30})).unwrap();
    assert_eq!(record.id, 0);

    let record = normalize(&json!({"id": 1942.0})).unwrap();
    assert_eq!(record.id, 1942);
}

#[test]
fn name_chain() {
    assert_eq!(normalize(&json!({"titulo": "Hades"})).unwrap().name, "Hades");
    assert_eq!(normalize(&json!({"nome": "Hades II"})).unwrap().name, "Hades II");
    assert_eq!(
        normalize(&json!({"name": "  ", "titulo": "Outer Wilds"})).unwrap().name,
        "Outer Wilds"
    );
}

#[test]
fn summary_from_descricao() {
    let record = normalize(&json!({"descricao": "Um jogo."})).unwrap();
    assert_eq!(record.summary, "Um jogo.");
}

#[test]
fn screenshots_mixed_shapes() {
    let record = normalize(&json!({
        "screenshots": [
            {"id": 1, "url": "//img.com/t_thumb/a.jpg"},
            "//img.com/t_screenshot_med/b.jpg",
            {"id": 3},
            ""
        ]
    }))
    .unwrap();
    assert_eq!(
        record.screenshots,
        vec![
            "https://img.com/t_screenshot_big/a.jpg",
            "https://img.com/t_screenshot_big/b.jpg"
        ]
    );
}

#[test]
fn release_date_formats() {
    let record = normalize(&json!({"first_release_date": 1_609_459_200})).unwrap();
    assert_eq!(record.release_date, Some(1_609_459_200));

    let record = normalize(&json!({"data_lancamento": "2021-01-01"})).unwrap();
    assert_eq!(record.release_date, Some(1_609_459_200));
    assert_eq!(record.release_year(), Some(2021));
    assert_eq!(record.release_date_string().as_deref(), Some("2021-01-01"));

    let record = normalize(&json!({"data_lancamento": "2021-01-01T00:00:00Z"})).unwrap();
    assert_eq!(record.release_date, Some(1_609_459_200));

    let record = normalize(&json!({"data_lancamento": "someday"})).unwrap();
    assert_eq!(record.release_date, None);

    let record = normalize(&json!({"first_release_date": 1e30, "release_date": "2021-01-01"})).unwrap();
    assert_eq!(record.release_date, Some(1_609_459_200));
}

#[test]
fn developer_string_wins() {
    let record = normalize(&json!({
        "developer": "Supergiant",
        "desenvolvedora": {"nome": "Other"}
    }))
    .unwrap();
    assert_eq!(record.developer, "Supergiant");
}

#[test]
fn developer_from_catalog_relation() {
    let record = normalize(&json!({
        "desenvolvedora": {"id_empresa": 1, "nome": "FromSoftware"},
        "publicadora": {"id_empresa": 2, "nome": "Bandai Namco"}
    }))
    .unwrap();
    assert_eq!(record.developer, "FromSoftware");
    assert_eq!(record.publisher, "Bandai Namco");
}

#[test]
fn companies_from_plain_catalog_strings() {
    let record = normalize(&json!({
        "desenvolvedora": "Supergiant Games",
        "publicadora": "  ",
        "involved_companies": [{"publisher": true, "company": {"name": "Private Division"}}]
    }))
    .unwrap();
    assert_eq!(record.developer, "Supergiant Games");
    // Blank relation falls through to the IGDB entry
    assert_eq!(record.publisher, "Private Division");
}

#[test]
fn relation_suffix_keys_are_not_read() {
    let record = normalize(&json!({"desenvolvedora_obj": {"nome": "Nope"}})).unwrap();
    assert_eq!(record.developer, UNKNOWN_COMPANY);
}

#[test]
fn companies_from_involved_companies() {
    let record = normalize(&json!({
        "involved_companies": [
            {"publisher": true, "developer": false, "company": {"name": "Annapurna"}},
            {"developer": true, "company": {"name": "Mobius Digital"}}
        ]
    }))
    .unwrap();
    assert_eq!(record.developer, "Mobius Digital");
    assert_eq!(record.publisher, "Annapurna");
}

#[test]
fn involved_company_flat_name() {
    let record = normalize(&json!({
        "involved_companies": [{"developer": 1, "name": "Team Cherry"}]
    }))
    .unwrap();
    assert_eq!(record.developer, "Team Cherry");
    assert_eq!(record.publisher, UNKNOWN_COMPANY);
}

#[test]
fn relation_wins_over_involved_companies() {
    let record = normalize(&json!({
        "desenvolvedora": {"nome": "Catalog Dev"},
        "involved_companies": [{"developer": true, "company": {"name": "IGDB Dev"}}]
    }))
    .unwrap();
    assert_eq!(record.developer, "Catalog Dev");
}

#[test]
fn normalize_is_idempotent_for_igdb_result() {
    let raw = json!({
        "id": 1942,
        "name": "The Witcher 3",
        "summary": "Geralt.",
        "cover": {"url": "//images.igdb.com/igdb/image/upload/t_thumb/co1wyy.jpg"},
        "screenshots": [{"url": "//images.igdb.com/igdb/image/upload/t_thumb/sc1.jpg"}],
        "genres": [{"name": "RPG"}, {"name": "Adventure"}],
        "total_rating": 93.4,
        "first_release_date": 1_431_993_600,
        "involved_companies": [
            {"developer": true, "company": {"name": "CD Projekt RED"}},
            {"publisher": true, "company": {"name": "CD Projekt"}}
        ]
    });
    let once = normalize(&raw).unwrap();
    assert_eq!(roundtrip(&once), once);
}

#[test]
fn normalize_is_idempotent_for_watchlist_entry() {
    let raw = json!({
        "status_jogo": "AINDA NAO JOGADO",
        "jogo": {
            "id_jogo": 9,
            "titulo": "Hollow Knight",
            "capa_url": "//img.com/t_thumb/hk.jpg",
            "generos": [{"nome_genero": "Metroidvania"}],
            "data_lancamento": "2017-02-24",
            "media_geral": 9.1
        }
    });
    let once = normalize(&raw).unwrap();
    assert_eq!(once.status, Some(PlayStatus::NotPlayed));
    assert_eq!(roundtrip(&once), once);
}

#[test]
fn normalize_is_idempotent_for_defaults() {
    let once = normalize(&json!({})).unwrap();
    assert_eq!(roundtrip(&once), once);
}

#[test]
fn normalize_list_unwraps_and_skips_nulls() {
    let records = normalize_list(&json!({"results": [{"id": 1, "name": "A"}, null, {"id": 2}]}));
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].name, "A");
    assert_eq!(records[1].id, 2);
}
