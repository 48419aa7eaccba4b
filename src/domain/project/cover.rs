//! 封面图片解析

/// 没有任何可用图片时的默认封面
pub const DEFAULT_COVER: &str = "/images/default.jpg";

/// 存储层把外链再次挂到 /media/ 下时产生的前缀
const NESTED_MEDIA_URL: &str = "/media/https://";

/// 体裁 → 图库文件名
const GENRE_IMAGES: &[(&str, &str)] = &[
    ("Thriller", "thriller.jpg"),
    ("Romance", "romance.jpg"),
    ("Modern Drama", "drama.jpg"),
    ("Historical", "historical.jpg"),
    ("Comedy", "comedy.jpg"),
    ("Childrens Fiction", "children.jpg"),
    ("Fantasy/Mythology", "fantasy.jpg"),
];

/// 支持的体裁列表
pub fn genres() -> impl Iterator<Item = &'static str> {
    GENRE_IMAGES.iter().map(|(genre, _)| *genre)
}

/// 选择项目卡片封面
///
/// 已上传图片优先，其次是体裁图库，最后是 `{images_base}/default.jpg`。
pub fn genre_image(images_base: &str, genre: Option<&str>, uploaded: Option<&str>) -> String {
    if let Some(uploaded) = uploaded.filter(|u| !u.is_empty()) {
        return uploaded.to_string();
    }

    let base = images_base.trim_end_matches('/');
    let file = genre
        .and_then(|g| GENRE_IMAGES.iter().find(|(name, _)| *name == g))
        .map(|(_, file)| *file)
        .unwrap_or("default.jpg");

    format!("{}/{}", base, file)
}

/// 把后端返回的 image 字段解析为可访问的 URL
///
/// - `/media/...` 视为后端托管文件，拼接 API 地址
/// - `http...` 若内嵌 `/media/https://`，取出内层外链
/// - 其他情况使用默认封面
pub fn resolve_image_url(api_base: &str, image: Option<&str>) -> String {
    match image {
        Some(path) if path.starts_with("/media/") => {
            format!("{}{}", api_base.trim_end_matches('/'), path)
        }
        Some(url) if url.starts_with("http") => match url.find(NESTED_MEDIA_URL) {
            Some(pos) => url[pos + "/media/".len()..].to_string(),
            None => url.to_string(),
        },
        _ => DEFAULT_COVER.to_string(),
    }
}
