use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{
    parse_macro_input, AttributeArgs, FnArg, ItemFn, Lit, Meta, MetaNameValue, NestedMeta, Pat,
};

/// Attribute used to mark functions as implementing a runtime builtin.
///
/// Example:
/// ```rust,ignore
/// use cosbind_macros::runtime_builtin;
///
/// #[runtime_builtin(
///     name = "cosine_scalar",
///     category = "math/trigonometry",
///     summary = "Cosine of a single numeric value in radians.",
/// )]
/// fn cosine_scalar_builtin(value: Value) -> Result<Value, BindError> {
///     /* implementation */
/// }
/// ```
///
/// The generated wrapper checks the argument count, converts each argument
/// from `Value` with `TryInto`, re-wraps the result as a `Value`, and submits
/// the builtin to the `cosbind-values` inventory so an embedding host can
/// discover it by name.
#[proc_macro_attribute]
pub fn runtime_builtin(args: TokenStream, input: TokenStream) -> TokenStream {
    let args = parse_macro_input!(args as AttributeArgs);
    let mut name: Option<String> = None;
    let mut category = String::new();
    let mut summary = String::new();
    let mut keywords = String::new();
    let mut examples = String::new();
    for arg in args {
        if let NestedMeta::Meta(Meta::NameValue(MetaNameValue { path, lit, .. })) = arg {
            let value = if let Lit::Str(ref s) = lit {
                s.value()
            } else {
                panic!("attribute values must be string literals");
            };
            if path.is_ident("name") {
                name = Some(value);
            } else if path.is_ident("category") {
                category = value;
            } else if path.is_ident("summary") {
                summary = value;
            } else if path.is_ident("keywords") {
                keywords = value;
            } else if path.is_ident("examples") {
                examples = value;
            } else {
                panic!("unknown attribute parameter; supported: name, category, summary, keywords, examples");
            }
        } else {
            panic!("expected `key = \"...\"` attribute arguments");
        }
    }
    let name_str = name.expect("expected `name = \"...\"` argument");

    let func: ItemFn = parse_macro_input!(input as ItemFn);
    let ident = &func.sig.ident;

    // Extract param idents and types
    let mut param_idents = Vec::new();
    let mut param_types = Vec::new();
    for arg in &func.sig.inputs {
        match arg {
            FnArg::Typed(pt) => {
                if let Pat::Ident(pi) = pt.pat.as_ref() {
                    param_idents.push(pi.ident.clone());
                } else {
                    panic!("parameters must be simple identifiers");
                }
                param_types.push((*pt.ty).clone());
            }
            _ => panic!("self parameter not allowed"),
        }
    }
    let param_len = param_idents.len();

    let inferred_param_types: Vec<proc_macro2::TokenStream> =
        param_types.iter().map(infer_builtin_type).collect();

    let inferred_return_type = match &func.sig.output {
        syn::ReturnType::Default => quote! { cosbind_values::Type::Void },
        syn::ReturnType::Type(_, ty) => infer_builtin_type(ty),
    };

    let conv_stmts: Vec<proc_macro2::TokenStream> = param_idents
        .iter()
        .zip(param_types.iter())
        .enumerate()
        .map(|(i, (ident, ty))| {
            quote! { let #ident : #ty = std::convert::TryInto::try_into(&args[#i])?; }
        })
        .collect();

    let wrapper_ident = format_ident!("__rt_wrap_{}", ident);

    let wrapper = quote! {
        fn #wrapper_ident(args: &[cosbind_values::Value]) -> Result<cosbind_values::Value, cosbind_values::BindError> {
            #![allow(unused_variables)]
            if args.len() != #param_len {
                return Err(cosbind_values::BindError::type_mismatch(format!(
                    "{}: expected {} args, got {}",
                    #name_str,
                    #param_len,
                    args.len()
                )));
            }
            #(#conv_stmts)*
            let res = #ident(#(#param_idents),*)?;
            Ok(cosbind_values::Value::from(res))
        }
    };

    let register = quote! {
        cosbind_values::inventory::submit! {
            cosbind_values::BuiltinFunction::new(
                #name_str,
                #summary,
                #category,
                #keywords,
                #examples,
                vec![#(#inferred_param_types),*],
                #inferred_return_type,
                #wrapper_ident
            )
        }
    };

    TokenStream::from(quote! {
        #func
        #wrapper
        #register
    })
}

/// Map Rust parameter/return types onto the registry's `Type` metadata.
fn infer_builtin_type(ty: &syn::Type) -> proc_macro2::TokenStream {
    use syn::Type;

    match ty {
        Type::Path(type_path) => {
            if let Some(ident) = type_path.path.get_ident() {
                match ident.to_string().as_str() {
                    "i32" | "i64" | "isize" => quote! { cosbind_values::Type::Int },
                    "f32" | "f64" => quote! { cosbind_values::Type::Num },
                    "bool" => quote! { cosbind_values::Type::Bool },
                    "String" => quote! { cosbind_values::Type::String },
                    "Tensor" => quote! { cosbind_values::Type::tensor() },
                    "MapValue" => quote! { cosbind_values::Type::Map },
                    _ => infer_complex_type(type_path),
                }
            } else {
                infer_complex_type(type_path)
            }
        }

        // Reference types like &str, &Value, &Tensor
        Type::Reference(type_ref) => match type_ref.elem.as_ref() {
            Type::Path(type_path) => {
                if let Some(ident) = type_path.path.get_ident() {
                    match ident.to_string().as_str() {
                        "str" => quote! { cosbind_values::Type::String },
                        _ => infer_builtin_type(&type_ref.elem),
                    }
                } else {
                    infer_builtin_type(&type_ref.elem)
                }
            }
            _ => infer_builtin_type(&type_ref.elem),
        },

        _ => quote! { cosbind_values::Type::Unknown },
    }
}

/// Infer types for complex path types like `Result<T, E>` or qualified names.
fn infer_complex_type(type_path: &syn::TypePath) -> proc_macro2::TokenStream {
    let path_str = quote! { #type_path }.to_string();

    if path_str.contains("Tensor") {
        quote! { cosbind_values::Type::tensor() }
    } else if path_str.contains("MapValue") {
        quote! { cosbind_values::Type::Map }
    } else if path_str.starts_with("Result") {
        // Extract the Ok type from Result<T, E>
        if let syn::PathArguments::AngleBracketed(angle_bracketed) =
            &type_path.path.segments.last().unwrap().arguments
        {
            if let Some(syn::GenericArgument::Type(ty)) = angle_bracketed.args.first() {
                return infer_builtin_type(ty);
            }
        }
        quote! { cosbind_values::Type::Unknown }
    } else {
        // `Value` and anything else can hold any runtime type
        quote! { cosbind_values::Type::Unknown }
    }
}
