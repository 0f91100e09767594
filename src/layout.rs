use std::mem::size_of;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    Float,
    UnsignedByte,
}

impl AttributeKind {
    pub const fn size(self) -> i32 {
        (match self {
            Self::Float => size_of::<f32>(),
            Self::UnsignedByte => size_of::<u8>(),
        }) as i32
    }

    pub const fn gl_enum(self) -> u32 {
        match self {
            Self::Float => glow::FLOAT,
            Self::UnsignedByte => glow::UNSIGNED_BYTE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    pub kind: AttributeKind,
    pub components: i32,
    pub normalized: bool,
}

impl VertexAttribute {
    pub const fn size(&self) -> i32 {
        self.kind.size() * self.components
    }
}

/// How one interleaved vertex is laid out in a vertex buffer.
///
/// Attribute `i` feeds shader location `i`.
#[derive(Debug, Clone, Default)]
pub struct VertexLayout {
    attributes: Vec<VertexAttribute>,
    stride: i32,
}

impl VertexLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Byte attributes are normalized to `[0, 1]`, everything else is passed as is.
    pub fn push(&mut self, kind: AttributeKind, components: i32) -> &mut Self {
        let attribute = VertexAttribute {
            kind,
            components,
            normalized: kind == AttributeKind::UnsignedByte,
        };
        self.stride += attribute.size();
        self.attributes.push(attribute);
        self
    }

    pub fn with(mut self, kind: AttributeKind, components: i32) -> Self {
        self.push(kind, components);
        self
    }

    pub fn stride(&self) -> i32 {
        self.stride
    }

    /// Yields `(location, byte offset, attribute)`.
    pub fn attributes(&self) -> impl Iterator<Item = (u32, i32, &VertexAttribute)> + '_ {
        self.attributes
            .iter()
            .enumerate()
            .scan(0, |offset, (location, attribute)| {
                let at = *offset;
                *offset += attribute.size();
                Some((location as u32, at, attribute))
            })
    }
}
