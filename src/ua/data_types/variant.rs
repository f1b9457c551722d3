use std::cmp::Ordering;

use crate::{Error, Result, ua};

crate::data_type!(Variant);

/// Total order on array elements.
///
/// Matches [`Ord`] everywhere except for floating-point elements, which use the IEEE 754 total
/// order to stay a total relation.
trait ElementOrd {
    fn element_cmp(&self, other: &Self) -> Ordering;
}

macro_rules! element_ord_via_ord {
    ($( $ty:ty ),* $(,)?) => {
        $(
            impl ElementOrd for $ty {
                fn element_cmp(&self, other: &Self) -> Ordering {
                    self.cmp(other)
                }
            }
        )*
    };
}

element_ord_via_ord!(
    bool,
    i8,
    u8,
    i16,
    u16,
    i32,
    u32,
    i64,
    u64,
    ua::String,
    ua::DateTime,
    ua::Guid,
    ua::ByteString,
    ua::NodeId,
    ua::ExpandedNodeId,
    ua::StatusCode,
    ua::QualifiedName,
    ua::LocalizedText,
    ua::ExtensionObject,
    ua::DataValue,
    ua::DiagnosticInfo,
);

impl ElementOrd for f32 {
    fn element_cmp(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }
}

impl ElementOrd for f64 {
    fn element_cmp(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }
}

impl ElementOrd for Variant {
    fn element_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

/// Length decides first; equal-length slices compare lexicographically.
fn cmp_elements<T: ElementOrd>(left: &[T], right: &[T]) -> Ordering {
    left.len().cmp(&right.len()).then_with(|| {
        for (l, r) in left.iter().zip(right) {
            let ordering = l.element_cmp(r);
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    })
}

/// Scalar payload of a [`Variant`].
///
/// One arm per builtin kind. There is deliberately no `Variant` arm: a variant cannot contain a
/// scalar variant, only arrays of variants.
#[derive(Debug, Clone, Default)]
pub enum VariantScalar {
    #[default]
    Null,
    Boolean(bool),
    SByte(i8),
    Byte(u8),
    Int16(i16),
    UInt16(u16),
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    Float(f32),
    Double(f64),
    String(ua::String),
    DateTime(ua::DateTime),
    Guid(ua::Guid),
    ByteString(ua::ByteString),
    XmlElement(ua::XmlElement),
    NodeId(Box<ua::NodeId>),
    ExpandedNodeId(Box<ua::ExpandedNodeId>),
    StatusCode(ua::StatusCode),
    QualifiedName(Box<ua::QualifiedName>),
    LocalizedText(Box<ua::LocalizedText>),
    ExtensionObject(Box<ua::ExtensionObject>),
    DataValue(Box<ua::DataValue>),
    DiagnosticInfo(Box<ua::DiagnosticInfo>),
}

impl VariantScalar {
    /// Builtin kind of the payload.
    #[must_use]
    pub const fn builtin_id(&self) -> ua::BuiltinId {
        match self {
            Self::Null => ua::BuiltinId::Null,
            Self::Boolean(_) => ua::BuiltinId::Boolean,
            Self::SByte(_) => ua::BuiltinId::SByte,
            Self::Byte(_) => ua::BuiltinId::Byte,
            Self::Int16(_) => ua::BuiltinId::Int16,
            Self::UInt16(_) => ua::BuiltinId::UInt16,
            Self::Int32(_) => ua::BuiltinId::Int32,
            Self::UInt32(_) => ua::BuiltinId::UInt32,
            Self::Int64(_) => ua::BuiltinId::Int64,
            Self::UInt64(_) => ua::BuiltinId::UInt64,
            Self::Float(_) => ua::BuiltinId::Float,
            Self::Double(_) => ua::BuiltinId::Double,
            Self::String(_) => ua::BuiltinId::String,
            Self::DateTime(_) => ua::BuiltinId::DateTime,
            Self::Guid(_) => ua::BuiltinId::Guid,
            Self::ByteString(_) => ua::BuiltinId::ByteString,
            Self::XmlElement(_) => ua::BuiltinId::XmlElement,
            Self::NodeId(_) => ua::BuiltinId::NodeId,
            Self::ExpandedNodeId(_) => ua::BuiltinId::ExpandedNodeId,
            Self::StatusCode(_) => ua::BuiltinId::StatusCode,
            Self::QualifiedName(_) => ua::BuiltinId::QualifiedName,
            Self::LocalizedText(_) => ua::BuiltinId::LocalizedText,
            Self::ExtensionObject(_) => ua::BuiltinId::ExtensionObject,
            Self::DataValue(_) => ua::BuiltinId::DataValue,
            Self::DiagnosticInfo(_) => ua::BuiltinId::DiagnosticInfo,
        }
    }

    fn payload_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Null, Self::Null) => Ordering::Equal,
            (Self::Boolean(l), Self::Boolean(r)) => l.element_cmp(r),
            (Self::SByte(l), Self::SByte(r)) => l.element_cmp(r),
            (Self::Byte(l), Self::Byte(r)) => l.element_cmp(r),
            (Self::Int16(l), Self::Int16(r)) => l.element_cmp(r),
            (Self::UInt16(l), Self::UInt16(r)) => l.element_cmp(r),
            (Self::Int32(l), Self::Int32(r)) => l.element_cmp(r),
            (Self::UInt32(l), Self::UInt32(r)) => l.element_cmp(r),
            (Self::Int64(l), Self::Int64(r)) => l.element_cmp(r),
            (Self::UInt64(l), Self::UInt64(r)) => l.element_cmp(r),
            (Self::Float(l), Self::Float(r)) => l.element_cmp(r),
            (Self::Double(l), Self::Double(r)) => l.element_cmp(r),
            (Self::String(l), Self::String(r)) => l.element_cmp(r),
            (Self::DateTime(l), Self::DateTime(r)) => l.element_cmp(r),
            (Self::Guid(l), Self::Guid(r)) => l.element_cmp(r),
            (Self::ByteString(l), Self::ByteString(r)) => l.element_cmp(r),
            (Self::XmlElement(l), Self::XmlElement(r)) => l.element_cmp(r),
            (Self::NodeId(l), Self::NodeId(r)) => l.element_cmp(r),
            (Self::ExpandedNodeId(l), Self::ExpandedNodeId(r)) => l.element_cmp(r),
            (Self::StatusCode(l), Self::StatusCode(r)) => l.element_cmp(r),
            (Self::QualifiedName(l), Self::QualifiedName(r)) => l.element_cmp(r),
            (Self::LocalizedText(l), Self::LocalizedText(r)) => l.element_cmp(r),
            (Self::ExtensionObject(l), Self::ExtensionObject(r)) => l.element_cmp(r),
            (Self::DataValue(l), Self::DataValue(r)) => l.element_cmp(r),
            (Self::DiagnosticInfo(l), Self::DiagnosticInfo(r)) => l.element_cmp(r),
            // Kinds are compared before payloads.
            _ => unreachable!("scalar payloads compared across kinds"),
        }
    }
}

macro_rules! scalar_from_plain {
    ($( ($name:ident, $ty:ty) ),* $(,)?) => {
        $(
            impl From<$ty> for VariantScalar {
                fn from(value: $ty) -> Self {
                    Self::$name(value)
                }
            }
        )*
    };
}

// `XmlElement` shares the byte-string representation, so only `ByteString` gets the conversion.
scalar_from_plain!(
    (Boolean, bool),
    (SByte, i8),
    (Byte, u8),
    (Int16, i16),
    (UInt16, u16),
    (Int32, i32),
    (UInt32, u32),
    (Int64, i64),
    (UInt64, u64),
    (Float, f32),
    (Double, f64),
    (String, ua::String),
    (DateTime, ua::DateTime),
    (Guid, ua::Guid),
    (ByteString, ua::ByteString),
    (StatusCode, ua::StatusCode),
);

macro_rules! scalar_from_boxed {
    ($( ($name:ident, $ty:ty) ),* $(,)?) => {
        $(
            impl From<$ty> for VariantScalar {
                fn from(value: $ty) -> Self {
                    Self::$name(Box::new(value))
                }
            }
        )*
    };
}

scalar_from_boxed!(
    (NodeId, ua::NodeId),
    (ExpandedNodeId, ua::ExpandedNodeId),
    (QualifiedName, ua::QualifiedName),
    (LocalizedText, ua::LocalizedText),
    (ExtensionObject, ua::ExtensionObject),
    (DataValue, ua::DataValue),
    (DiagnosticInfo, ua::DiagnosticInfo),
);

macro_rules! scalar_accessors {
    ($( ($name:ident, $ty:ty, $snake:ident) ),* $(,)?) => {
        paste::paste! {
            impl VariantScalar {
                $(
                    #[doc = concat!("Returns the `", stringify!($name), "` payload, if of that kind.")]
                    #[must_use]
                    pub fn [<as_ $snake>](&self) -> Option<&$ty> {
                        match self {
                            Self::$name(value) => Some(value),
                            _ => None,
                        }
                    }
                )*
            }
        }
    };
}

// Boxed arms auto-deref to the payload type, so one list covers all kinds.
scalar_accessors!(
    (Boolean, bool, boolean),
    (SByte, i8, sbyte),
    (Byte, u8, byte),
    (Int16, i16, int16),
    (UInt16, u16, uint16),
    (Int32, i32, int32),
    (UInt32, u32, uint32),
    (Int64, i64, int64),
    (UInt64, u64, uint64),
    (Float, f32, float),
    (Double, f64, double),
    (String, ua::String, string),
    (DateTime, ua::DateTime, date_time),
    (Guid, ua::Guid, guid),
    (ByteString, ua::ByteString, byte_string),
    (NodeId, ua::NodeId, node_id),
    (ExpandedNodeId, ua::ExpandedNodeId, expanded_node_id),
    (StatusCode, ua::StatusCode, status_code),
    (QualifiedName, ua::QualifiedName, qualified_name),
    (LocalizedText, ua::LocalizedText, localized_text),
    (ExtensionObject, ua::ExtensionObject, extension_object),
    (DataValue, ua::DataValue, data_value),
    (DiagnosticInfo, ua::DiagnosticInfo, diagnostic_info),
);

macro_rules! declare_variant_array {
    ($( ($name:ident, $ty:ty) ),* $(,)?) => {
        /// Array payload of a [`Variant`]: one homogeneous element vector per builtin kind.
        ///
        /// There is no `Null` arm; arrays of the null kind are forbidden and an absent value is
        /// the null scalar instead.
        #[derive(Debug, Clone)]
        pub enum VariantArray {
            $( $name(Vec<$ty>), )*
        }

        impl VariantArray {
            /// Builtin kind of the elements.
            #[must_use]
            pub const fn builtin_id(&self) -> ua::BuiltinId {
                match self {
                    $( Self::$name(_) => ua::BuiltinId::$name, )*
                }
            }

            /// Number of elements.
            #[must_use]
            pub fn len(&self) -> usize {
                match self {
                    $( Self::$name(elements) => elements.len(), )*
                }
            }

            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.len() == 0
            }

            /// Length decides first; equal-length arrays compare lexicographically.
            fn payload_cmp(&self, other: &Self) -> Ordering {
                match (self, other) {
                    $( (Self::$name(left), Self::$name(right)) => cmp_elements(left, right), )*
                    // Kinds are compared before payloads.
                    _ => unreachable!("array payloads compared across kinds"),
                }
            }

            /// Deep-copies the inclusive element range. Bounds must have been clipped.
            fn slice(&self, start: usize, end: usize) -> Self {
                match self {
                    $( Self::$name(elements) => Self::$name(elements[start..=end].to_vec()), )*
                }
            }

            /// Overwrites `count` elements starting at `start` from the head of `src`.
            ///
            /// Fails when the element kinds differ. Bounds must have been clipped.
            fn overwrite(&mut self, src: &Self, start: usize, count: usize) -> bool {
                match (self, src) {
                    $(
                        (Self::$name(dst), Self::$name(src)) => {
                            dst[start..start + count].clone_from_slice(&src[..count]);
                            true
                        }
                    )*
                    _ => false,
                }
            }

            /// The empty array of the same kind.
            fn empty_like(&self) -> Self {
                match self {
                    $( Self::$name(_) => Self::$name(Vec::new()), )*
                }
            }
        }
    };
}

declare_variant_array!(
    (Boolean, bool),
    (SByte, i8),
    (Byte, u8),
    (Int16, i16),
    (UInt16, u16),
    (Int32, i32),
    (UInt32, u32),
    (Int64, i64),
    (UInt64, u64),
    (Float, f32),
    (Double, f64),
    (String, ua::String),
    (DateTime, ua::DateTime),
    (Guid, ua::Guid),
    (ByteString, ua::ByteString),
    (XmlElement, ua::XmlElement),
    (NodeId, ua::NodeId),
    (ExpandedNodeId, ua::ExpandedNodeId),
    (StatusCode, ua::StatusCode),
    (QualifiedName, ua::QualifiedName),
    (LocalizedText, ua::LocalizedText),
    (ExtensionObject, ua::ExtensionObject),
    (DataValue, ua::DataValue),
    (Variant, Variant),
    (DiagnosticInfo, ua::DiagnosticInfo),
);

/// Self-describing value: a builtin kind in scalar, one-dimensional array, or matrix form.
#[derive(Debug, Clone)]
pub enum Variant {
    Scalar(VariantScalar),
    Array(VariantArray),
    Matrix {
        dimensions: Vec<i32>,
        elements: VariantArray,
    },
}

impl Default for Variant {
    fn default() -> Self {
        Self::Scalar(VariantScalar::Null)
    }
}

impl Variant {
    /// The null scalar.
    #[must_use]
    pub const fn null() -> Self {
        Self::Scalar(VariantScalar::Null)
    }

    #[must_use]
    pub fn scalar(value: impl Into<VariantScalar>) -> Self {
        Self::Scalar(value.into())
    }

    #[must_use]
    pub const fn array(elements: VariantArray) -> Self {
        Self::Array(elements)
    }

    /// Creates a matrix value.
    ///
    /// The dimensions must be non-empty and non-negative, their product must fit in `i32`, and it
    /// must equal the number of elements. An overflowing product reports
    /// [`BAD_OUT_OF_MEMORY`](ua::StatusCode::BAD_OUT_OF_MEMORY), any other violation
    /// [`BAD_INVALID_ARGUMENT`](ua::StatusCode::BAD_INVALID_ARGUMENT).
    ///
    /// # Errors
    ///
    /// Fails when the dimensions do not describe the element count.
    pub fn matrix(dimensions: Vec<i32>, elements: VariantArray) -> Result<Self> {
        if dimensions.is_empty() {
            return Err(Error::new(ua::StatusCode::BAD_INVALID_ARGUMENT));
        }
        let mut total: i32 = 1;
        for &dimension in &dimensions {
            if dimension < 0 {
                return Err(Error::new(ua::StatusCode::BAD_INVALID_ARGUMENT));
            }
            total = total
                .checked_mul(dimension)
                .ok_or_else(|| Error::new(ua::StatusCode::BAD_OUT_OF_MEMORY))?;
        }
        if usize::try_from(total).ok() != Some(elements.len()) {
            return Err(Error::new(ua::StatusCode::BAD_INVALID_ARGUMENT));
        }
        Ok(Self::Matrix {
            dimensions,
            elements,
        })
    }

    /// Builtin kind of the payload.
    #[must_use]
    pub const fn builtin_id(&self) -> ua::BuiltinId {
        match self {
            Self::Scalar(value) => value.builtin_id(),
            Self::Array(elements) | Self::Matrix { elements, .. } => elements.builtin_id(),
        }
    }

    /// Checks for the null scalar.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Scalar(VariantScalar::Null))
    }

    #[must_use]
    pub const fn as_scalar(&self) -> Option<&VariantScalar> {
        match self {
            Self::Scalar(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_array(&self) -> Option<&VariantArray> {
        match self {
            Self::Array(elements) => Some(elements),
            _ => None,
        }
    }

    const fn shape_ordinal(&self) -> u8 {
        match self {
            Self::Scalar(_) => 0,
            Self::Array(_) => 1,
            Self::Matrix { .. } => 2,
        }
    }

    /// Checks whether `range` addresses existing content of this value.
    ///
    /// Only one-dimensional ranges are supported; they apply to `String` and `ByteString` scalars
    /// and to arrays of any kind, and hold when the range start lies within the actual length.
    ///
    /// # Errors
    ///
    /// Fails with [`BAD_INVALID_ARGUMENT`](ua::StatusCode::BAD_INVALID_ARGUMENT) when `range` is
    /// not one-dimensional.
    pub fn has_range(&self, range: &ua::NumericRange) -> Result<bool> {
        let Some(dimension) = range.single_dimension() else {
            return Err(Error::new(ua::StatusCode::BAD_INVALID_ARGUMENT));
        };
        let length = match self {
            Self::Scalar(VariantScalar::String(string)) => string.as_str().map(str::len),
            Self::Scalar(VariantScalar::ByteString(bytes)) => bytes.as_bytes().map(<[u8]>::len),
            Self::Array(elements) => Some(elements.len()),
            Self::Scalar(_) | Self::Matrix { .. } => return Ok(false),
        };
        Ok(length.is_some_and(|length| {
            usize::try_from(dimension.start).is_ok_and(|start| start < length)
        }))
    }

    /// Extracts the sub-value addressed by `range` as a new variant of the same kind.
    ///
    /// Byte contents of `String`/`ByteString` scalars and elements of arrays are deep-copied over
    /// the inclusive interval, with the range end clipped to the actual length. A start past the
    /// end yields the empty value of the same kind.
    ///
    /// # Errors
    ///
    /// Fails with [`BAD_INVALID_ARGUMENT`](ua::StatusCode::BAD_INVALID_ARGUMENT) when `range` is
    /// not one-dimensional or this value has no sliceable content.
    pub fn get_range(&self, range: &ua::NumericRange) -> Result<Self> {
        let Some(dimension) = range.single_dimension() else {
            return Err(Error::new(ua::StatusCode::BAD_INVALID_ARGUMENT));
        };
        match self {
            Self::Scalar(VariantScalar::String(string)) => {
                let bytes = ua::ByteString::new(string.to_string().as_bytes());
                let sliced = bytes.slice_range(dimension.start, dimension.end);
                let text = String::from_utf8_lossy(sliced.as_bytes().unwrap_or_default());
                Ok(Self::Scalar(VariantScalar::String(ua::String::new(&text))))
            }
            Self::Scalar(VariantScalar::ByteString(bytes)) => Ok(Self::Scalar(
                VariantScalar::ByteString(bytes.slice_range(dimension.start, dimension.end)),
            )),
            Self::Array(elements) => {
                let length = elements.len();
                let start = usize::try_from(dimension.start).unwrap_or(usize::MAX);
                if start >= length {
                    return Ok(Self::Array(elements.empty_like()));
                }
                let end = usize::try_from(dimension.end)
                    .unwrap_or(usize::MAX)
                    .min(length - 1);
                Ok(Self::Array(elements.slice(start, end)))
            }
            Self::Scalar(_) | Self::Matrix { .. } => {
                Err(Error::new(ua::StatusCode::BAD_INVALID_ARGUMENT))
            }
        }
    }

    /// Overwrites the sub-value addressed by `range` with the contents of `src`.
    ///
    /// Kind and shape of `src` must match, and `src` must hold exactly as many elements as the
    /// range addresses. The range end clips silently to the actual length of this value; clipped
    /// source elements are dropped.
    ///
    /// # Errors
    ///
    /// Fails with [`BAD_INVALID_ARGUMENT`](ua::StatusCode::BAD_INVALID_ARGUMENT) on any mismatch,
    /// leaving this value unchanged.
    pub fn set_range(&mut self, src: &Self, range: &ua::NumericRange) -> Result<()> {
        let Some(dimension) = range.single_dimension() else {
            return Err(Error::new(ua::StatusCode::BAD_INVALID_ARGUMENT));
        };
        if self.builtin_id() != src.builtin_id() {
            return Err(Error::new(ua::StatusCode::BAD_INVALID_ARGUMENT));
        }
        match (self, src) {
            (
                Self::Scalar(VariantScalar::String(dst)),
                Self::Scalar(VariantScalar::String(src)),
            ) => {
                let mut bytes = ua::ByteString::new(dst.to_string().as_bytes());
                let src_bytes = ua::ByteString::new(src.to_string().as_bytes());
                if !bytes.write_range(&src_bytes, dimension.start, dimension.end) {
                    return Err(Error::new(ua::StatusCode::BAD_INVALID_ARGUMENT));
                }
                let text = String::from_utf8_lossy(bytes.as_bytes().unwrap_or_default());
                *dst = ua::String::new(&text);
                Ok(())
            }
            (
                Self::Scalar(VariantScalar::ByteString(dst)),
                Self::Scalar(VariantScalar::ByteString(src)),
            ) => {
                if dst.write_range(src, dimension.start, dimension.end) {
                    Ok(())
                } else {
                    Err(Error::new(ua::StatusCode::BAD_INVALID_ARGUMENT))
                }
            }
            (Self::Array(dst), Self::Array(src)) => {
                if u32::try_from(src.len()).ok() != Some(dimension.extent()) {
                    return Err(Error::new(ua::StatusCode::BAD_INVALID_ARGUMENT));
                }
                let length = dst.len();
                let start = usize::try_from(dimension.start).unwrap_or(usize::MAX);
                if start >= length {
                    // Nothing to copy.
                    return Ok(());
                }
                let end = usize::try_from(dimension.end)
                    .unwrap_or(usize::MAX)
                    .min(length - 1);
                if dst.overwrite(src, start, end - start + 1) {
                    Ok(())
                } else {
                    Err(Error::new(ua::StatusCode::BAD_INVALID_ARGUMENT))
                }
            }
            _ => Err(Error::new(ua::StatusCode::BAD_INVALID_ARGUMENT)),
        }
    }
}

impl Ord for Variant {
    /// Orders by builtin kind, then shape (scalar before array before matrix), then payload.
    fn cmp(&self, other: &Self) -> Ordering {
        self.builtin_id()
            .cmp(&other.builtin_id())
            .then_with(|| self.shape_ordinal().cmp(&other.shape_ordinal()))
            .then_with(|| match (self, other) {
                (Self::Scalar(left), Self::Scalar(right)) => left.payload_cmp(right),
                (Self::Array(left), Self::Array(right)) => left.payload_cmp(right),
                (
                    Self::Matrix {
                        dimensions: left_dims,
                        elements: left,
                    },
                    Self::Matrix {
                        dimensions: right_dims,
                        elements: right,
                    },
                ) => left_dims
                    .len()
                    .cmp(&right_dims.len())
                    .then_with(|| left_dims.cmp(right_dims))
                    .then_with(|| left.payload_cmp(right)),
                // Shapes are compared before payloads.
                _ => unreachable!("variant payloads compared across shapes"),
            })
    }
}

impl PartialOrd for Variant {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Variant {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Variant {}
