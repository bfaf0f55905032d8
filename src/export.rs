//! Report generation for collected samples.
//!
//! Downstream consumers take the saved sample list as plain data; these
//! generators impose no contract back on the core. KML output is suitable
//! for Google Earth review of a day's collection, CSV for spreadsheet
//! import, JSON for archival.

use log::info;

use crate::error::Result;
use crate::{FieldSample, LocationCatalogue, Measurements, ProjectInfo};

/// Generate a KML document with a placemark per planned location and per
/// saved sample.
pub fn project_kml(
    project: &ProjectInfo,
    catalogue: &LocationCatalogue,
    samples: &[FieldSample],
) -> String {
    let mut placemarks = String::new();

    for location in catalogue.locations() {
        placemarks.push_str(&format!(
            r#"    <Placemark>
      <name>{id}</name>
      <description><![CDATA[
        <b>Planned Location</b><br/>
        <b>Description:</b> {description}<br/>
        <b>Matrix:</b> {matrix}<br/>
        <b>Priority:</b> {priority:?}<br/>
      ]]></description>
      <styleUrl>#plannedPoint</styleUrl>
      <Point>
        <coordinates>{lng},{lat},0</coordinates>
      </Point>
    </Placemark>
"#,
            id = xml_escape(&location.id),
            description = location.description,
            matrix = location.matrix,
            priority = location.priority,
            lng = location.coordinate.longitude,
            lat = location.coordinate.latitude,
        ));
    }

    for sample in samples {
        let accuracy = sample
            .location
            .accuracy
            .map(|a| format!("±{:.1}m", a))
            .unwrap_or_else(|| "unreported".to_string());
        let planned = sample
            .planned_location_id
            .as_deref()
            .map(|id| format!("<b>Planned Location:</b> {}<br/>", id))
            .unwrap_or_default();

        placemarks.push_str(&format!(
            r#"    <Placemark>
      <name>Sample {id}</name>
      <description><![CDATA[
        <b>Project:</b> {project}<br/>
        <b>Sample ID:</b> {id}<br/>
        <b>Matrix:</b> {matrix}<br/>
        <b>Depth:</b> {depth}<br/>
        <b>Description:</b> {description}<br/>
        <b>Technician:</b> {technician}<br/>
        <b>GPS Accuracy:</b> {accuracy}<br/>
        {planned}<b>Measurements:</b><br/>
        {measurements}
      ]]></description>
      <styleUrl>#samplePoint</styleUrl>
      <Point>
        <coordinates>{lng},{lat},0</coordinates>
      </Point>
    </Placemark>
"#,
            id = xml_escape(&sample.id),
            project = project.name,
            matrix = sample.matrix,
            depth = sample.depth.as_deref().unwrap_or("Surface"),
            description = sample.description,
            technician = sample.technician,
            accuracy = accuracy,
            planned = planned,
            measurements = measurements_html(&sample.measurements),
            lng = sample.location.point.longitude,
            lat = sample.location.point.latitude,
        ));
    }

    info!(
        "KML report for {}: {} planned locations, {} samples",
        project.id,
        catalogue.len(),
        samples.len()
    );

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2">
  <Document>
    <name>{name}</name>
    <description>{site} field assessment report</description>
    <Style id="plannedPoint">
      <IconStyle>
        <Icon>
          <href>http://maps.google.com/mapfiles/kml/pushpin/blue-pushpin.png</href>
        </Icon>
      </IconStyle>
    </Style>
    <Style id="samplePoint">
      <IconStyle>
        <Icon>
          <href>http://maps.google.com/mapfiles/kml/pushpin/ylw-pushpin.png</href>
        </Icon>
      </IconStyle>
    </Style>
{placemarks}  </Document>
</kml>
"#,
        name = xml_escape(&project.name),
        site = xml_escape(&project.site),
        placemarks = placemarks,
    )
}

fn measurements_html(m: &Measurements) -> String {
    let mut lines = Vec::new();
    if let Some(t) = m.temperature {
        lines.push(format!("&nbsp;&nbsp;temperature: {} °C", t));
    }
    if let Some(ph) = m.ph {
        lines.push(format!("&nbsp;&nbsp;pH: {}", ph));
    }
    if let Some(c) = m.conductivity {
        lines.push(format!("&nbsp;&nbsp;conductivity: {} µS/cm", c));
    }
    if let Some(t) = m.turbidity {
        lines.push(format!("&nbsp;&nbsp;turbidity: {} NTU", t));
    }
    if let Some(d) = m.dissolved_oxygen {
        lines.push(format!("&nbsp;&nbsp;dissolved oxygen: {} mg/L", d));
    }
    lines.join("<br/>\n")
}

fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Generate a CSV table of saved samples.
///
/// Fields containing commas, quotes, or newlines are quoted per RFC 4180.
pub fn samples_csv(samples: &[FieldSample]) -> String {
    let mut csv = String::from(
        "id,matrix,latitude,longitude,accuracy_m,depth,description,\
         temperature_c,ph,conductivity_us_cm,turbidity_ntu,dissolved_oxygen_mg_l,\
         notes,technician,timestamp_ms,status,planned_location_id\n",
    );

    for sample in samples {
        let m = &sample.measurements;
        let row = [
            csv_field(&sample.id),
            sample.matrix.to_string(),
            format!("{:.6}", sample.location.point.latitude),
            format!("{:.6}", sample.location.point.longitude),
            opt_num(sample.location.accuracy),
            csv_field(sample.depth.as_deref().unwrap_or("")),
            csv_field(&sample.description),
            opt_num(m.temperature),
            opt_num(m.ph),
            opt_num(m.conductivity),
            opt_num(m.turbidity),
            opt_num(m.dissolved_oxygen),
            csv_field(&sample.notes),
            csv_field(&sample.technician),
            sample
                .timestamp_ms
                .map(|t| t.to_string())
                .unwrap_or_default(),
            format!("{:?}", sample.status).to_lowercase(),
            csv_field(sample.planned_location_id.as_deref().unwrap_or("")),
        ];
        csv.push_str(&row.join(","));
        csv.push('\n');
    }

    csv
}

fn opt_num(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn csv_field(text: &str) -> String {
    if text.contains(',') || text.contains('"') || text.contains('\n') {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}

/// Serialize a session report (project metadata plus all saved samples)
/// as pretty-printed JSON.
pub fn session_report_json(project: &ProjectInfo, samples: &[FieldSample]) -> Result<String> {
    #[derive(serde::Serialize)]
    struct SessionReport<'a> {
        project: &'a ProjectInfo,
        sample_count: usize,
        samples: &'a [FieldSample],
    }

    let report = SessionReport {
        project,
        sample_count: samples.len(),
        samples,
    };

    Ok(serde_json::to_string_pretty(&report)?)
}
