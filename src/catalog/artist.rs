use serde::{Deserialize, Serialize};

#[derive(Clone, Deserialize, Serialize, Debug, PartialEq)]
pub struct Artist {
    pub id: String,
    pub name: String,
    /// Coarse genre category.
    pub genre_cluster: String,
    /// Fine genre category.
    pub genre_specific: String,
    /// 2-D genre embedding, used to lay artists out on the map.
    pub genre_x: f64,
    pub genre_y: f64,
    pub popularity: f64,
    pub image: Option<String>,
}
