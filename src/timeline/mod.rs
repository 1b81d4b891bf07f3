pub(crate) mod clip_timeline;
