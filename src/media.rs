/// Options for building a Cloudinary delivery URL.
#[derive(Debug, Clone, Default)]
pub struct ImageOptions<'a> {
    /// Transformation segment such as `f_auto,q_auto`.
    pub transformations: Option<&'a str>,
    /// File extension; `jpg` when unset.
    pub format: Option<&'a str>,
    /// Emit the `v<version>/` segment. Omitting it avoids stale 404s after
    /// an asset is re-uploaded.
    pub skip_version: bool,
}

/// Build a delivery URL for an image stored as `"<version>/<public id>"`.
pub fn cloudinary_url(cloud_name: &str, image_meta: &str, opts: &ImageOptions<'_>) -> String {
    let format = opts.format.unwrap_or("jpg");
    let tx = opts
        .transformations
        .filter(|t| !t.is_empty())
        .map(|t| format!("{t}/"))
        .unwrap_or_default();

    let (version, public_id) = image_meta.split_once('/').unwrap_or((image_meta, ""));
    let version_segment = if opts.skip_version {
        String::new()
    } else {
        format!("v{version}/")
    };

    format!(
        "https://res.cloudinary.com/{cloud_name}/image/upload/{tx}{version_segment}{public_id}.{format}"
    )
}
