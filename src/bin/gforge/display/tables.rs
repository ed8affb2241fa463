use std::io::{self, Write};

use gsd_forge::{Compound, ExportedFrame, ForcefieldLibrary};

use crate::util::text::truncate;

const INDENT: &str = "      ";

const BOX_INNER_WIDTH: usize = 62;
const SAFE_TABLE_WIDTH: usize = BOX_INNER_WIDTH - INDENT.len();

const MAX_ROWS: usize = 15;

pub fn print_structure_info(compound: &Compound) {
    let stderr = io::stderr();
    let mut out = stderr.lock();

    let mut rows = vec![
        ("Name", compound.name.clone()),
        ("Particles", format!("{}", compound.particle_count())),
        ("Bonds", format!("{}", compound.bond_count())),
    ];

    match &compound.simbox {
        Some(simbox) => {
            let [a, b, c] = simbox.lengths();
            rows.push(("Box (nm)", format!("{:.3} × {:.3} × {:.3}", a, b, c)));

            let [alpha, beta, gamma] = simbox.angles();
            rows.push((
                "Angles (α β γ)",
                format!("{:.1}° {:.1}° {:.1}°", alpha, beta, gamma),
            ));
        }
        None => rows.push(("Box", "none (bounding box)".to_string())),
    }

    let rigid = compound.rigid_body_count();
    if rigid > 0 {
        rows.push(("Rigid Bodies", format!("{}", rigid)));
    }

    print_kv_table(&mut out, "Structure Summary", &rows);
}

pub fn print_type_distribution(frame: &ExportedFrame) {
    let stderr = io::stderr();
    let mut out = stderr.lock();

    let particles = &frame.particles;
    let mut counts = vec![0usize; particles.types.len()];
    for &id in &particles.typeids {
        if let Some(c) = counts.get_mut(id) {
            *c += 1;
        }
    }

    let mut sorted: Vec<(String, usize)> = particles.types.iter().cloned().zip(counts).collect();
    // Stable sort keeps the natural type order among equal counts.
    sorted.sort_by(|a, b| b.1.cmp(&a.1));

    print_distribution_table(&mut out, "Particle Type Distribution", &sorted, particles.typeids.len());
}

pub fn print_frame_summary(frame: &ExportedFrame) {
    let stderr = io::stderr();
    let mut out = stderr.lock();

    let rows: Vec<(&str, usize, usize)> = vec![
        ("Particles", frame.n_particles(), frame.particles.types.len()),
        ("Bonds", frame.n_bonds(), frame.bonds.types.len()),
        ("Angles", frame.n_angles(), frame.angles.types.len()),
        ("Dihedrals", frame.n_dihedrals(), frame.dihedrals.types.len()),
        ("Pairs", frame.n_pairs(), frame.pairs.types.len()),
    ];

    let _ = writeln!(out, "{}┌─ Frame Contents ─┐", INDENT);
    let _ = writeln!(out, "{}┌─────────────────────┬────────┬────────┐", INDENT);
    let _ = writeln!(out, "{}│ Section             │  Count │  Types │", INDENT);
    let _ = writeln!(out, "{}├─────────────────────┼────────┼────────┤", INDENT);

    for (section, count, types) in &rows {
        let _ = writeln!(out, "{}│ {:<19} │ {:>6} │ {:>6} │", INDENT, section, count, types);
    }

    let _ = writeln!(out, "{}└─────────────────────┴────────┴────────┘", INDENT);

    let [lx, ly, lz, xy, xz, yz] = frame.configuration.box_tensor;
    let _ = writeln!(
        out,
        "{}Box: Lx={:.4} Ly={:.4} Lz={:.4}  xy={:.4} xz={:.4} yz={:.4}",
        INDENT, lx, ly, lz, xy, xz, yz
    );
}

/// Lists the force fields in `library`; written to `out` since this is the
/// command's actual output rather than progress chatter.
pub fn print_forcefields(out: &mut impl Write, library: &ForcefieldLibrary) {
    let name_w = 12usize;
    let count_w = 6usize;
    let desc_w = 40usize;

    let _ = writeln!(
        out,
        "┌{n}┬{r}┬{t}┬{d}┐",
        n = "─".repeat(name_w + 2),
        r = "─".repeat(count_w + 2),
        t = "─".repeat(count_w + 2),
        d = "─".repeat(desc_w + 2)
    );
    let _ = writeln!(
        out,
        "│ {:<name_w$} │ {:>count_w$} │ {:>count_w$} │ {:<desc_w$} │",
        "Name", "Rules", "Types", "Description",
    );
    let _ = writeln!(
        out,
        "├{n}┼{r}┼{t}┼{d}┤",
        n = "─".repeat(name_w + 2),
        r = "─".repeat(count_w + 2),
        t = "─".repeat(count_w + 2),
        d = "─".repeat(desc_w + 2)
    );

    for ff in library.iter() {
        let _ = writeln!(
            out,
            "│ {:<name_w$} │ {:>count_w$} │ {:>count_w$} │ {:<desc_w$} │",
            truncate(&ff.name, name_w),
            ff.rules.len(),
            ff.type_names().len(),
            truncate(&ff.description, desc_w),
        );
    }

    let _ = writeln!(
        out,
        "└{n}┴{r}┴{t}┴{d}┘",
        n = "─".repeat(name_w + 2),
        r = "─".repeat(count_w + 2),
        t = "─".repeat(count_w + 2),
        d = "─".repeat(desc_w + 2)
    );
}

fn print_distribution_table(
    out: &mut impl Write,
    title: &str,
    data: &[(String, usize)],
    total: usize,
) {
    let name_w = 12usize;
    let count_w = 8usize;
    let sep_overhead = 6;
    let dist_w = SAFE_TABLE_WIDTH.saturating_sub(name_w + count_w + sep_overhead);
    let max_bar_width = dist_w.saturating_sub(8).min(20);

    let _ = writeln!(
        out,
        "{}┌─ {} ─┐",
        INDENT,
        truncate(title, SAFE_TABLE_WIDTH - 6)
    );
    let _ = writeln!(
        out,
        "{}┌{name_line}┬{count_line}┬{dist_line}┐",
        INDENT,
        name_line = "─".repeat(name_w + 2),
        count_line = "─".repeat(count_w + 2),
        dist_line = "─".repeat(dist_w + 2)
    );
    let _ = writeln!(
        out,
        "{}│ {:<name_w$} │ {:>count_w$} │ {:<dist_w$} │",
        INDENT, "Type", "Count", "Distribution",
    );
    let _ = writeln!(
        out,
        "{}├{name_line}┼{count_line}┼{dist_line}┤",
        INDENT,
        name_line = "─".repeat(name_w + 2),
        count_line = "─".repeat(count_w + 2),
        dist_line = "─".repeat(dist_w + 2)
    );

    for (name, count) in data.iter().take(MAX_ROWS) {
        let pct = if total == 0 {
            0.0
        } else {
            (*count as f64 / total as f64) * 100.0
        };
        let bar = make_bar(pct, max_bar_width);
        let dist_cell = format!("{}  {:>5.1}%", bar, pct);
        let _ = writeln!(
            out,
            "{}│ {:<name_w$} │ {:>count_w$} │ {:<dist_w$} │",
            INDENT,
            truncate(name, name_w),
            count,
            dist_cell,
        );
    }

    if data.len() > MAX_ROWS {
        let _ = writeln!(
            out,
            "{}│ {:<name_w$} │ {:>count_w$} │ {:<dist_w$} │",
            INDENT,
            "...",
            "...",
            format!("({} more types)", data.len() - MAX_ROWS),
        );
    }

    let _ = writeln!(
        out,
        "{}└{name_line}┴{count_line}┴{dist_line}┘",
        INDENT,
        name_line = "─".repeat(name_w + 2),
        count_line = "─".repeat(count_w + 2),
        dist_line = "─".repeat(dist_w + 2)
    );
}

fn print_kv_table(out: &mut impl Write, title: &str, rows: &[(&str, String)]) {
    let key_w = 16usize;
    let sep_overhead = 6;
    let val_w = SAFE_TABLE_WIDTH.saturating_sub(key_w + sep_overhead);

    let _ = writeln!(
        out,
        "{}┌─ {} ─┐",
        INDENT,
        truncate(title, SAFE_TABLE_WIDTH - 6)
    );
    let _ = writeln!(
        out,
        "{}┌{k_line}┬{v_line}┐",
        INDENT,
        k_line = "─".repeat(key_w + 2),
        v_line = "─".repeat(val_w + 2)
    );
    let _ = writeln!(
        out,
        "{}│ {:<key_w$} │ {:>val_w$} │",
        INDENT, "Metric", "Value",
    );
    let _ = writeln!(
        out,
        "{}├{k_line}┼{v_line}┤",
        INDENT,
        k_line = "─".repeat(key_w + 2),
        v_line = "─".repeat(val_w + 2)
    );

    for (key, val) in rows {
        let _ = writeln!(
            out,
            "{}│ {:<key_w$} │ {:>val_w$} │",
            INDENT,
            truncate(key, key_w),
            truncate(val, val_w),
        );
    }

    let _ = writeln!(
        out,
        "{}└{k_line}┴{v_line}┘",
        INDENT,
        k_line = "─".repeat(key_w + 2),
        v_line = "─".repeat(val_w + 2)
    );
}

fn make_bar(pct: f64, max_width: usize) -> String {
    let filled = (((pct / 100.0) * max_width as f64).round() as usize).min(max_width);
    let empty = max_width - filled;
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}
