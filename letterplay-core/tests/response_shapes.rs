//! Payloads shaped like the ones each backend endpoint actually returns.

use letterplay_core::{GameRecord, PlayStatus, UNKNOWN_COMPANY, extract_list, normalize, normalize_list};
use serde_json::json;

#[test]
fn igdb_search_page() {
    let response = json!({
        "results": [
            {
                "id": 119133,
                "name": "Elden Ring",
                "summary": "Rise, Tarnished.",
                "cover_url": "//images.igdb.com/igdb/image/upload/t_thumb/co4jni.jpg",
                "screenshots": ["//images.igdb.com/igdb/image/upload/t_screenshot_med/sc1.jpg"],
                "videos": [],
                "genres": ["Role-playing (RPG)", "Adventure"],
                "metacritic_rating": 96.0,
                "developer": "FromSoftware",
                "publisher": null,
                "media_nota_sistema": null
            }
        ]
    });

    let games = normalize_list(&response);
    assert_eq!(games.len(), 1);
    let g = &games[0];
    assert_eq!(g.id, 119133);
    assert_eq!(g.cover_url, "https://images.igdb.com/igdb/image/upload/t_cover_big/co4jni.jpg");
    assert_eq!(
        g.screenshots,
        vec!["https://images.igdb.com/igdb/image/upload/t_screenshot_big/sc1.jpg"]
    );
    assert_eq!(g.rating, 96.0);
    assert_eq!(g.developer, "FromSoftware");
    assert_eq!(g.publisher, UNKNOWN_COMPANY);
    assert!(g.status.is_none());
}

#[test]
fn weekly_ranking_rows() {
    let response = json!([
        {
            "id_jogo": 4,
            "titulo": "Celeste",
            "media": 9.5,
            "total_reviews": 12,
            "capa_url": "https://cdn.example.com/celeste.png",
            "descricao": null,
            "desenvolvedora": {"id_empresa": 1, "nome": "Maddy Makes Games"},
            "publicadora": null,
            "generos": [{"nome_genero": "Platform"}]
        }
    ]);

    let games = normalize_list(&response);
    let g = &games[0];
    assert_eq!(g.id, 4);
    assert_eq!(g.name, "Celeste");
    assert_eq!(g.rating, 9.5);
    assert_eq!(g.developer, "Maddy Makes Games");
    assert_eq!(g.genres, vec!["Platform"]);
    assert_eq!(g.summary, letterplay_core::UNKNOWN_SUMMARY);
}

#[test]
fn full_watchlist_entries() {
    let watchlist = json!({
        "id_watchlist": 3,
        "id_user": 1,
        "nome": "Favoritos",
        "jogos": [
            {"status_jogo": "JOGADO", "jogo": {"id_jogo": 1, "titulo": "Portal 2", "generos": []}},
            {"status_jogo": "DROPADO", "jogo": {"id_jogo": 2, "titulo": "Dark Souls"}}
        ]
    });

    let entries = extract_list(&watchlist);
    assert_eq!(entries.len(), 2);

    let games: Vec<GameRecord> = entries.iter().filter_map(normalize).collect();
    assert_eq!(games[0].status, Some(PlayStatus::Played));
    assert_eq!(games[1].status, Some(PlayStatus::Dropped));
    assert_eq!(games[1].name, "Dark Souls");
}

#[test]
fn cached_record_rehydrates_unchanged() {
    let original = normalize(&json!({
        "jogo": {
            "id_jogo": 10,
            "titulo": "Stardew Valley",
            "capa_url": "//img.example.com/t_thumb/sv.jpg",
            "desenvolvedora": {"nome": "ConcernedApe"}
        },
        "status_jogo": "AINDA NAO JOGADO"
    }))
    .unwrap();

    let cached = serde_json::to_string(&original).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&cached).unwrap();
    assert_eq!(normalize(&parsed).unwrap(), original);

    // Direct deserialization of the cache agrees as well
    let direct: GameRecord = serde_json::from_str(&cached).unwrap();
    assert_eq!(direct, original);
}
