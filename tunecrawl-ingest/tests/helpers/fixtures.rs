//! Remote response fixtures shaped like the live API

use serde_json::{json, Value};

pub const ARTIST_ID: &str = "9270";
pub const ARTIST_NAME: &str = "萨顶顶";
pub const ALBUM_NAME: &str = "香蜜沉沉烬如霜 电视原声音乐专辑";
pub const SONG_ID: &str = "536096151";
pub const SONG_NAME: &str = "左手指月";

/// Track ids of the summary fixture, in order
pub const TRACK_IDS: [&str; 3] = [SONG_ID, "28188197", "28188198"];

pub fn summary_json() -> Value {
    json!({
        "code": 200,
        "more": true,
        "artist": {
            "id": 9270,
            "name": ARTIST_NAME,
            "alias": ["Sa Dingding"],
            "picUrl": "http://p1.music.126.net/cover.jpg",
            "img1v1Url": "http://p1.music.126.net/avatar.jpg",
            "briefDesc": "萨顶顶，中国女歌手。",
            "musicSize": 90
        },
        "hotSongs": [
            {"id": 536096151, "name": SONG_NAME, "pop": 100},
            {"id": 28188197, "name": "万物生", "pop": 95},
            {"id": 28188198, "name": "神香", "pop": 80}
        ]
    })
}

pub fn detail_json(ids: &[&str]) -> Value {
    let songs: Vec<Value> = ids
        .iter()
        .map(|id| {
            let album = if *id == SONG_ID { ALBUM_NAME } else { "万物生" };
            json!({
                "id": id.parse::<u64>().unwrap(),
                "name": format!("song {id}"),
                "ar": [{"id": 9270, "name": ARTIST_NAME, "tns": []}],
                "al": {"id": 37237048, "name": album, "picUrl": "http://p1.music.126.net/al.jpg"}
            })
        })
        .collect();
    json!({"code": 200, "songs": songs, "privileges": []})
}

pub fn comment_json(id: u64, content: &str) -> Value {
    json!({
        "commentId": id,
        "content": content,
        "likedCount": 1024,
        "time": 1_538_000_000_000_i64,
        "user": {
            "userId": 77,
            "nickname": "听众",
            "avatarUrl": "http://p1.music.126.net/u.jpg"
        }
    })
}

/// Two hot and two general comments whose bodies name the track
pub fn comments_json(track_id: &str) -> Value {
    json!({
        "code": 200,
        "hotComments": [
            comment_json(1, &format!("{track_id} hot 1")),
            comment_json(2, &format!("{track_id} hot 2"))
        ],
        "comments": [
            comment_json(3, &format!("{track_id} general 1")),
            comment_json(4, &format!("{track_id} general 2"))
        ],
        "total": 4
    })
}

pub fn urls_json(ids: &[&str]) -> Value {
    let data: Vec<Value> = ids
        .iter()
        .map(|id| {
            json!({
                "id": id.parse::<u64>().unwrap(),
                "url": format!("http://m7.music.126.net/{id}.mp3"),
                "br": 128000
            })
        })
        .collect();
    json!({"code": 200, "data": data})
}

/// Comment bodies the extractor should produce for `ids`, in order
pub fn expected_texts(ids: &[&str]) -> Vec<String> {
    ids.iter()
        .flat_map(|id| {
            [
                format!("{id} hot 1"),
                format!("{id} hot 2"),
                format!("{id} general 1"),
                format!("{id} general 2"),
            ]
        })
        .collect()
}
