// Crate-level docs carry an svgbob drawing of the block layout. With the `doc` feature the
// drawing is rendered to SVG; otherwise the doc lines are passed through as plain text.
#[cfg(feature = "doc")]
macro_rules! layout_doc {
    (
        $($t:tt)*
    ) => (
        svgbobdoc::transform!(
            $($t)*
        )
    )
}

#[cfg(not(feature = "doc"))]
macro_rules! layout_doc {
    (
        $( #![doc = $d:literal] )*
    ) => (
        core::concat!( $( $d, '\n' ),* )
    );
}

pub(crate) use layout_doc;
