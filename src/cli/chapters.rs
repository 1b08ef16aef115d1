use crate::{
    Res,
    args::ChaptersAddOpts,
    cli::Outcome,
    error::Error,
    mangacat::{self, ApiClient, SUCCESS},
    sniff::{Sniffer, retain_images},
    types::{ChapterRequest, Group},
    validate, warning,
};

/// Creates a chapter and uploads its page images.
///
/// # Steps
///
/// 1. **Pre-screen**: drops directories and files without an image signature
///    from `--files`. Any other I/O error aborts the command.
/// 2. **Open**: opens every remaining file through the image validator. This
///    is the authoritative check; a file failing it aborts the command.
/// 3. **Create**: POSTs the chapter metadata and reads the new chapter id.
/// 4. **Upload**: sends the images in batches to the new chapter.
///
/// Nothing is sent before steps 1 and 2 succeed, so their errors are
/// returned as `Err`. A failure in steps 3 or 4 yields [`Outcome::failure`].
pub async fn add_chapter(opts: &ChaptersAddOpts, client: &ApiClient) -> Res<Outcome> {
    let sniffer = Sniffer::standard();

    let mut paths = opts.files.clone();
    retain_images(&mut paths, &sniffer)?;
    if paths.is_empty() {
        let given: Vec<String> = opts
            .files
            .iter()
            .map(|p| format!("\"{}\"", p.display()))
            .collect();
        return Err(Error::Validation(format!(
            "no image files among {}",
            given.join(", ")
        )));
    }
    if paths.len() < opts.files.len() {
        warning!(
            "Skipping {} of {} files that are not images.",
            opts.files.len() - paths.len(),
            opts.files.len()
        );
    }

    let images = paths
        .iter()
        .map(|path| validate::open_image(path, &sniffer))
        .collect::<Res<Vec<_>>>()?;

    let request = chapter_request(opts);
    let Some(id) = mangacat::chapters::create(client, &request, &opts.token).await else {
        return Ok(Outcome::failure());
    };

    if mangacat::chapters::upload_pages(client, id, &images, &opts.token).await != SUCCESS {
        return Ok(Outcome::failure());
    }

    Ok(Outcome::success(format!("Added chapter with ID: {id}")))
}

/// Chapter metadata as sent to the API.
pub fn chapter_request(opts: &ChaptersAddOpts) -> ChapterRequest {
    ChapterRequest {
        title: opts.title.clone(),
        series: opts.series,
        number_absolute: opts.number_absolute,
        number_volume: opts.number_volume,
        volume_number: opts.volume_number,
        groups: opts
            .groups
            .iter()
            .map(|name| Group { name: name.clone() })
            .collect(),
        language: opts.language.clone(),
        published: !opts.hidden,
        delay: opts.delay.clone(),
    }
}
