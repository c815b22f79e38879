//! PPT Report Module
//! Assembles the multi-page report deck (one chart per slide) and writes the
//! standalone chart image.
//!
//! The deck is written as raw ZIP/XML parts. Pages are collected in memory and
//! the file is created exactly once, through a `.part` sibling that is renamed
//! into place, so a failed run never leaves a truncated deck behind.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;
use zip::write::FileOptions;
use zip::ZipWriter;

/// EMU (English Metric Units) conversion: 914400 EMU = 1 inch
const EMU_PER_INCH: i64 = 914400;
/// 10 x 7.5 inch slides
const SLIDE_WIDTH: i64 = 9144000;
const SLIDE_HEIGHT: i64 = 6858000;
const SLIDE_MARGIN: i64 = EMU_PER_INCH / 4;

const APP_NAME: &str = "Shooting Report";

#[derive(Error, Debug)]
pub enum PptError {
    #[error("No slides to write")]
    Empty,
    #[error("I/O error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// One deck page: a rendered chart and its pixel size.
#[derive(Debug, Clone)]
pub struct Slide {
    pub title: String,
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// PPT generator for the chart report
pub struct PptGenerator;

impl PptGenerator {
    /// Write a deck with one full-page chart per slide, in slice order.
    pub fn generate_ppt_from_bytes(
        slides: &[Slide],
        output_path: &Path,
        title: &str,
    ) -> Result<(), PptError> {
        if slides.is_empty() {
            return Err(PptError::Empty);
        }

        let part_path = Self::part_path(output_path);
        if let Err(err) = Self::write_deck(slides, &part_path, title) {
            let _ = fs::remove_file(&part_path);
            return Err(err);
        }

        fs::rename(&part_path, output_path).map_err(|source| PptError::Io {
            path: output_path.to_path_buf(),
            source,
        })?;

        info!(
            path = %output_path.display(),
            slides = slides.len(),
            "Report deck written"
        );
        Ok(())
    }

    fn write_deck(slides: &[Slide], path: &Path, title: &str) -> Result<(), PptError> {
        let io_err = |source| PptError::Io {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).map_err(io_err)?;
        let mut zip = ZipWriter::new(file);
        let options = FileOptions::default();

        let slide_count = slides.len();
        let mut parts: Vec<(String, String)> = vec![
            (
                "[Content_Types].xml".to_string(),
                Self::content_types_xml(slide_count),
            ),
            ("_rels/.rels".to_string(), ROOT_RELS_XML.to_string()),
            (
                "ppt/_rels/presentation.xml.rels".to_string(),
                Self::presentation_rels_xml(slide_count),
            ),
            (
                "ppt/presentation.xml".to_string(),
                Self::presentation_xml(slide_count),
            ),
            (
                "ppt/slideLayouts/slideLayout1.xml".to_string(),
                SLIDE_LAYOUT_XML.to_string(),
            ),
            (
                "ppt/slideLayouts/_rels/slideLayout1.xml.rels".to_string(),
                LAYOUT_RELS_XML.to_string(),
            ),
            (
                "ppt/slideMasters/slideMaster1.xml".to_string(),
                SLIDE_MASTER_XML.to_string(),
            ),
            (
                "ppt/slideMasters/_rels/slideMaster1.xml.rels".to_string(),
                MASTER_RELS_XML.to_string(),
            ),
            ("ppt/theme/theme1.xml".to_string(), THEME_XML.to_string()),
            ("docProps/core.xml".to_string(), Self::core_props_xml(title)),
            ("docProps/app.xml".to_string(), Self::app_props_xml(slide_count)),
        ];

        for (idx, slide) in slides.iter().enumerate() {
            let num = idx + 1;
            parts.push((
                format!("ppt/slides/_rels/slide{}.xml.rels", num),
                Self::slide_rels_xml(num),
            ));
            parts.push((format!("ppt/slides/slide{}.xml", num), Self::slide_xml(slide)));
        }

        for (name, xml) in &parts {
            zip.start_file(name.as_str(), options)?;
            zip.write_all(xml.as_bytes()).map_err(io_err)?;
        }

        for (idx, slide) in slides.iter().enumerate() {
            zip.start_file(format!("ppt/media/image{}.png", idx + 1), options)?;
            zip.write_all(&slide.png).map_err(io_err)?;
        }

        zip.finish()?;
        Ok(())
    }

    /// Write a single rendered chart as a standalone PNG.
    pub fn write_image(png: &[u8], output_path: &Path) -> Result<(), PptError> {
        fs::write(output_path, png).map_err(|source| PptError::Io {
            path: output_path.to_path_buf(),
            source,
        })?;
        info!(path = %output_path.display(), bytes = png.len(), "Chart image written");
        Ok(())
    }

    fn part_path(output_path: &Path) -> PathBuf {
        let mut name = output_path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".part");
        output_path.with_file_name(name)
    }

    /// Largest box with the chart's aspect ratio inside the slide margins,
    /// centered: (x, y, cx, cy) in EMU.
    fn fit_image(width: u32, height: u32) -> (i64, i64, i64, i64) {
        let max_w = SLIDE_WIDTH - 2 * SLIDE_MARGIN;
        let max_h = SLIDE_HEIGHT - 2 * SLIDE_MARGIN;
        if width == 0 || height == 0 {
            return (SLIDE_MARGIN, SLIDE_MARGIN, max_w, max_h);
        }

        let (w, h) = (width as i64, height as i64);
        let (cx, cy) = if max_w * h <= max_h * w {
            (max_w, max_w * h / w)
        } else {
            (max_h * w / h, max_h)
        };
        ((SLIDE_WIDTH - cx) / 2, (SLIDE_HEIGHT - cy) / 2, cx, cy)
    }

    fn escape_xml(text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            match c {
                '&' => out.push_str("&amp;"),
                '<' => out.push_str("&lt;"),
                '>' => out.push_str("&gt;"),
                '"' => out.push_str("&quot;"),
                '\'' => out.push_str("&apos;"),
                _ => out.push(c),
            }
        }
        out
    }

    fn content_types_xml(slide_count: usize) -> String {
        let mut xml = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Default Extension="png" ContentType="image/png"/>
<Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/>
<Override PartName="/ppt/slideMasters/slideMaster1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml"/>
<Override PartName="/ppt/slideLayouts/slideLayout1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml"/>
<Override PartName="/ppt/theme/theme1.xml" ContentType="application/vnd.openxmlformats-officedocument.theme+xml"/>
<Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>
<Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>
"#
        .to_string();

        for i in 1..=slide_count {
            xml.push_str(&format!(
                r#"<Override PartName="/ppt/slides/slide{}.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>"#,
                i
            ));
            xml.push('\n');
        }
        xml.push_str("</Types>");
        xml
    }

    fn presentation_rels_xml(slide_count: usize) -> String {
        let mut xml = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="slideMasters/slideMaster1.xml"/>
<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="theme/theme1.xml"/>
"#
        .to_string();

        // rId1/rId2 are taken by master and theme
        for i in 1..=slide_count {
            xml.push_str(&format!(
                r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide{}.xml"/>"#,
                i + 2,
                i
            ));
            xml.push('\n');
        }
        xml.push_str("</Relationships>");
        xml
    }

    fn presentation_xml(slide_count: usize) -> String {
        let slide_ids: String = (1..=slide_count)
            .map(|i| format!(r#"<p:sldId id="{}" r:id="rId{}"/>"#, 255 + i, i + 2))
            .collect();

        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentation xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" saveSubsetFonts="1">
<p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>
<p:sldIdLst>{}</p:sldIdLst>
<p:sldSz cx="{}" cy="{}" type="screen4x3"/>
<p:notesSz cx="{}" cy="{}"/>
</p:presentation>"#,
            slide_ids, SLIDE_WIDTH, SLIDE_HEIGHT, SLIDE_HEIGHT, SLIDE_WIDTH
        )
    }

    fn slide_rels_xml(slide_num: usize) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout1.xml"/>
<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="../media/image{}.png"/>
</Relationships>"#,
            slide_num
        )
    }

    fn slide_xml(slide: &Slide) -> String {
        let (x, y, cx, cy) = Self::fit_image(slide.width, slide.height);
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">
<p:cSld>
<p:spTree>
<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>
<p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>
<p:pic>
<p:nvPicPr>
<p:cNvPr id="2" name="Chart" descr="{}"/>
<p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr>
<p:nvPr/>
</p:nvPicPr>
<p:blipFill>
<a:blip r:embed="rId2"/>
<a:stretch><a:fillRect/></a:stretch>
</p:blipFill>
<p:spPr>
<a:xfrm><a:off x="{}" y="{}"/><a:ext cx="{}" cy="{}"/></a:xfrm>
<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>
</p:spPr>
</p:pic>
</p:spTree>
</p:cSld>
<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>
</p:sld>"#,
            Self::escape_xml(&slide.title),
            x,
            y,
            cx,
            cy
        )
    }

    fn core_props_xml(title: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
<dc:title>{}</dc:title>
<dc:creator>{}</dc:creator>
<cp:lastModifiedBy>{}</cp:lastModifiedBy>
<cp:revision>1</cp:revision>
</cp:coreProperties>"#,
            Self::escape_xml(title),
            APP_NAME,
            APP_NAME
        )
    }

    fn app_props_xml(slide_count: usize) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">
<Application>{}</Application>
<PresentationFormat>On-screen Show (4:3)</PresentationFormat>
<Slides>{}</Slides>
<Notes>0</Notes>
<HiddenSlides>0</HiddenSlides>
<ScaleCrop>false</ScaleCrop>
<LinksUpToDate>false</LinksUpToDate>
<SharedDoc>false</SharedDoc>
<HyperlinksChanged>false</HyperlinksChanged>
<AppVersion>16.0000</AppVersion>
</Properties>"#,
            APP_NAME, slide_count
        )
    }
}

const ROOT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/>
<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>
<Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/>
</Relationships>"#;

const SLIDE_LAYOUT_XML: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldLayout xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" type="blank" preserve="1">
<p:cSld name="Blank">"#,
    r#"<p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr></p:spTree>"#,
    r#"</p:cSld>
<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>
</p:sldLayout>"#
);

const LAYOUT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="../slideMasters/slideMaster1.xml"/>
</Relationships>"#;

const SLIDE_MASTER_XML: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldMaster xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">
<p:cSld><p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg>"#,
    r#"<p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr></p:spTree>"#,
    r#"</p:cSld>
<p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/>
<p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="rId1"/></p:sldLayoutIdLst>
</p:sldMaster>"#
);

const MASTER_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout1.xml"/>
<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="../theme/theme1.xml"/>
</Relationships>"#;

// Minimal theme: a theme part is mandatory, its styles are never referenced
// by the picture-only slides.
const THEME_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Report">
<a:themeElements>
<a:clrScheme name="Report"><a:dk1><a:srgbClr val="000000"/></a:dk1><a:lt1><a:srgbClr val="FFFFFF"/></a:lt1><a:dk2><a:srgbClr val="44546A"/></a:dk2><a:lt2><a:srgbClr val="E7E6E6"/></a:lt2><a:accent1><a:srgbClr val="4C72B0"/></a:accent1><a:accent2><a:srgbClr val="DD8452"/></a:accent2><a:accent3><a:srgbClr val="55A868"/></a:accent3><a:accent4><a:srgbClr val="C44E52"/></a:accent4><a:accent5><a:srgbClr val="8172B3"/></a:accent5><a:accent6><a:srgbClr val="937860"/></a:accent6><a:hlink><a:srgbClr val="0563C1"/></a:hlink><a:folHlink><a:srgbClr val="954F72"/></a:folHlink></a:clrScheme>
<a:fontScheme name="Report"><a:majorFont><a:latin typeface="Calibri Light"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont><a:minorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont></a:fontScheme>
<a:fmtScheme name="Report">
<a:fillStyleLst><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:fillStyleLst>
<a:lnStyleLst><a:ln w="6350"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln><a:ln w="12700"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln><a:ln w="19050"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln></a:lnStyleLst>
<a:effectStyleLst><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle></a:effectStyleLst>
<a:bgFillStyleLst><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:bgFillStyleLst>
</a:fmtScheme>
</a:themeElements>
<a:objectDefaults/>
<a:extraClrSchemeLst/>
</a:theme>"#;
