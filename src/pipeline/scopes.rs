use serde_json::Value;
use tracing::trace;

use super::naming::FileNamer;
use crate::{
    helpers::json::{array_at, dim_at, non_empty_str_at, str_at, value_at},
    media::{CookieSnapshot, MediaDescriptor, MediaKind, PipelineResult},
};

const DEFAULT_SCOPE_KEY: &str = "__DEFAULT_SCOPE__";
const SCOPE_KEYS: [&str; 2] = ["webapp.video-detail", "webapp.reflow.video.detail"];

pub struct ScopeContext<'a> {
    pub owner_id: &'a str,
    pub cookies: &'a CookieSnapshot,
    pub namer: &'a mut FileNamer,
}

/// Walk the fixed scope keys in order, overwriting page metadata and
/// appending one descriptor per resolvable asset. Absent scopes and missing
/// keys are skipped, never errors.
pub fn resolve_scopes(root: &Value, ctx: &mut ScopeContext<'_>, result: &mut PipelineResult) {
    for scope_key in SCOPE_KEYS {
        match value_at(root, &[DEFAULT_SCOPE_KEY, scope_key]) {
            Some(scope) => resolve_scope(scope, ctx, result),
            None => trace!(scope = scope_key, "Scope absent"),
        }
    }
}

fn resolve_scope(scope: &Value, ctx: &mut ScopeContext<'_>, result: &mut PipelineResult) {
    let share_meta = scope
        .get("shareMeta")
        .filter(|meta| meta.as_object().is_some_and(|m| !m.is_empty()));
    if let Some(meta) = share_meta {
        result.title = str_at(meta, &["title"]).map(str::to_owned);
        result.description = str_at(meta, &["desc"]).map(str::to_owned);
        result.cover_url = str_at(meta, &["cover_url"]).map(str::to_owned);
    }

    let Some(item) = value_at(scope, &["itemInfo", "itemStruct"]) else {
        return;
    };

    if let Some(play_addr) = non_empty_str_at(item, &["video", "playAddr"]) {
        trace!(url = play_addr, "Resolved video");
        let descriptor = descriptor_for(
            ctx,
            MediaKind::Video,
            play_addr,
            dim_at(item, &["video", "width"]),
            dim_at(item, &["video", "height"]),
        );
        result.media.push(descriptor);
    }

    if let Some(play_url) = non_empty_str_at(item, &["music", "playUrl"]) {
        trace!(url = play_url, "Resolved audio");
        let descriptor = descriptor_for(ctx, MediaKind::Audio, play_url, None, None);
        result.media.push(descriptor);
    }

    for image in array_at(item, &["imagePost", "images"]).unwrap_or_default() {
        let Some(url_list) = array_at(image, &["imageURL", "urlList"]) else {
            continue;
        };

        // Every mirror URL becomes its own descriptor and takes a counter slot.
        for mirror in url_list.iter().filter_map(Value::as_str) {
            trace!(url = mirror, "Resolved image");
            let descriptor = descriptor_for(
                ctx,
                MediaKind::Image,
                mirror,
                dim_at(image, &["imageWidth"]),
                dim_at(image, &["imageHeight"]),
            );
            result.media.push(descriptor);
        }
    }
}

fn descriptor_for(
    ctx: &mut ScopeContext<'_>,
    kind: MediaKind,
    source_url: &str,
    width: Option<u32>,
    height: Option<u32>,
) -> MediaDescriptor {
    MediaDescriptor {
        kind,
        source_url: source_url.to_owned(),
        cookies: ctx.cookies.clone(),
        owner_id: ctx.owner_id.to_owned(),
        width,
        height,
        filename: ctx.namer.next(ctx.owner_id, kind.extension()),
        path: None,
    }
}
